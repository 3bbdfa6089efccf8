//! Messaging between resource owners, requesters and booking parties.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::message::ThreadDto,
    server::{
        data::{
            booking::BookingRepository, message::MessageRepository,
            notification::NotificationRepository, resource::ResourceRepository,
            user::UserRepository,
        },
        error::{auth::AuthError, AppError},
        model::{
            message::{CreateMessageParam, Message, Participants, ThreadId, ThreadSummary},
            notification::{CreateNotificationParam, NotificationKind},
            user::User,
        },
    },
};

/// A thread as seen by one participant.
#[derive(Debug, Clone)]
pub struct ThreadView {
    pub thread_id: ThreadId,
    pub other_user: User,
    pub messages: Vec<Message>,
}

impl ThreadView {
    pub fn into_dto(self) -> ThreadDto {
        ThreadDto {
            thread_id: self.thread_id.to_string(),
            other_user: self.other_user.into_dto(),
            messages: self.messages.into_iter().map(Message::into_dto).collect(),
        }
    }
}

pub struct MessageService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MessageService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn threads(&self, user_id: i32) -> Result<Vec<ThreadSummary>, AppError> {
        Ok(MessageRepository::new(self.db)
            .get_threads_for_user(user_id)
            .await?)
    }

    /// Resolves the two users a thread id refers to.
    ///
    /// A resource thread is between the requester and the resource owner; a booking
    /// thread is between the booking holder and the owner of the booked resource.
    pub async fn participants(&self, thread_id: ThreadId) -> Result<Participants, AppError> {
        let not_found = || AppError::NotFound("Conversation not found".to_string());

        match thread_id {
            ThreadId::Resource {
                resource_id,
                requester_id,
            } => {
                let resource = ResourceRepository::new(self.db)
                    .find_by_id(resource_id)
                    .await?
                    .ok_or_else(not_found)?;
                if resource.owner_id == requester_id {
                    return Err(not_found());
                }

                Ok(Participants {
                    first: requester_id,
                    second: resource.owner_id,
                })
            }
            ThreadId::Booking { booking_id } => {
                let booking = BookingRepository::new(self.db)
                    .find_by_id(booking_id)
                    .await?
                    .ok_or_else(not_found)?;
                let resource = ResourceRepository::new(self.db)
                    .find_by_id(booking.resource_id)
                    .await?
                    .ok_or_else(not_found)?;

                Ok(Participants {
                    first: booking.user_id,
                    second: resource.owner_id,
                })
            }
        }
    }

    /// Returns a thread's messages and marks those addressed to the viewer read.
    ///
    /// # Returns
    /// - `Ok(ThreadView)` - Messages in chronological order with the other participant
    /// - `Err(AppError::NotFound)` - Thread refers to a missing resource, booking or user
    /// - `Err(AuthError::AccessDenied)` - Viewer is not a participant
    pub async fn view(&self, thread_id: ThreadId, viewer_id: i32) -> Result<ThreadView, AppError> {
        let participants = self.participants(thread_id).await?;
        self.ensure_participant(&participants, viewer_id, thread_id)?;

        let other_user = self.find_user(participants.other(viewer_id)).await?;

        let key = thread_id.to_string();
        let repo = MessageRepository::new(self.db);
        let messages = repo.get_thread(&key).await?;
        repo.mark_thread_read(&key, viewer_id).await?;

        Ok(ThreadView {
            thread_id,
            other_user,
            messages,
        })
    }

    /// Thread id for asking a resource's owner about it.
    pub async fn start(&self, resource_id: i32, requester_id: i32) -> Result<ThreadId, AppError> {
        let resource = ResourceRepository::new(self.db)
            .find_by_id(resource_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Resource not found".to_string()))?;

        if resource.owner_id == requester_id {
            return Err(AppError::BadRequest("You cannot message yourself.".to_string()));
        }

        Ok(ThreadId::Resource {
            resource_id,
            requester_id,
        })
    }

    /// Sends a message to the other participant and notifies them.
    pub async fn send(
        &self,
        thread_id: ThreadId,
        sender: &User,
        content: String,
    ) -> Result<Message, AppError> {
        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(AppError::BadRequest("Message content is required.".to_string()));
        }

        let participants = self.participants(thread_id).await?;
        self.ensure_participant(&participants, sender.id, thread_id)?;
        let receiver_id = participants.other(sender.id);
        self.find_user(receiver_id).await?;

        let txn = self.db.begin().await?;
        let message = MessageRepository::new(&txn)
            .create(CreateMessageParam {
                thread_id,
                sender_id: sender.id,
                receiver_id,
                content,
            })
            .await?;

        NotificationRepository::new(&txn)
            .create(
                CreateNotificationParam::new(
                    receiver_id,
                    NotificationKind::NewMessage,
                    "New Message",
                    format!("{} sent you a message.", sender.name),
                )
                .link(format!("/messages/{}", thread_id)),
            )
            .await?;

        txn.commit().await?;

        Ok(message)
    }

    fn ensure_participant(
        &self,
        participants: &Participants,
        user_id: i32,
        thread_id: ThreadId,
    ) -> Result<(), AppError> {
        if participants.contains(user_id) {
            Ok(())
        } else {
            Err(AuthError::AccessDenied(
                user_id,
                format!("User is not a participant of thread {}", thread_id),
            )
            .into())
        }
    }

    async fn find_user(&self, user_id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
