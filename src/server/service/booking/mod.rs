//! Booking service: conflict detection, the status lifecycle and the completion sweep.
//!
//! Every write that depends on a conflict check runs inside one database transaction
//! while holding the matching [`BookingLocks`] guard, so two requests for the same slot
//! cannot both pass the check. Notifications for a state change are written in the
//! same transaction and commit or roll back with it.

pub mod lock;

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        booking::BookingRepository, notification::NotificationRepository,
        resource::ResourceRepository,
    },
    error::{booking::BookingError, AppError},
    model::{
        booking::{
            Booking, BookingDetail, BookingOverview, BookingStatus, BookingWindow,
            ConflictReport, CreateBookingParam,
        },
        notification::{CreateNotificationParam, NotificationKind},
        resource::Resource,
        user::User,
    },
};

pub use lock::BookingLocks;

const BOOKINGS_LINK: &str = "/bookings";
const MANAGE_LINK: &str = "/bookings/manage";

pub struct BookingService<'a> {
    db: &'a DatabaseConnection,
    locks: &'a BookingLocks,
}

impl<'a> BookingService<'a> {
    pub fn new(db: &'a DatabaseConnection, locks: &'a BookingLocks) -> Self {
        Self { db, locks }
    }

    /// Marks approved bookings that have ended as completed.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of bookings completed by this run
    pub async fn complete_past(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let completed = BookingRepository::new(self.db).complete_past(now).await?;
        if completed > 0 {
            tracing::info!("Marked {} past booking(s) as completed", completed);
        }

        Ok(completed)
    }

    /// The user's own bookings grouped into pending, upcoming and past.
    ///
    /// Runs the completion sweep first so finished bookings show as completed.
    pub async fn list_for_user(&self, user_id: i32) -> Result<BookingOverview, AppError> {
        let now = Utc::now();
        self.complete_past(now).await?;

        let repo = BookingRepository::new(self.db);
        let bookings = repo.get_by_user(user_id).await?;
        let details = repo.with_details(bookings).await?;

        Ok(BookingOverview::group(details, now))
    }

    /// Bookings on resources owned by `owner_id`, grouped like [`Self::list_for_user`].
    pub async fn list_for_owner(&self, owner_id: i32) -> Result<BookingOverview, AppError> {
        let now = Utc::now();
        self.complete_past(now).await?;

        let repo = BookingRepository::new(self.db);
        let bookings = repo.get_by_resource_owner(owner_id).await?;
        let details = repo.with_details(bookings).await?;

        Ok(BookingOverview::group(details, now))
    }

    /// Pending bookings across all resources, oldest request first.
    pub async fn list_pending(&self) -> Result<Vec<BookingDetail>, AppError> {
        let repo = BookingRepository::new(self.db);
        let bookings = repo.get_pending().await?;

        Ok(repo.with_details(bookings).await?)
    }

    /// Creates a booking after checking both conflict scopes.
    ///
    /// The initial status is `approved` unless the resource requires approval, in which
    /// case it is `pending`. Requester and owner are notified.
    ///
    /// # Returns
    /// - `Ok(Booking)` - The created booking
    /// - `Err(AppError::BadRequest)` - Window starts in the past
    /// - `Err(AppError::NotFound)` - Resource does not exist
    /// - `Err(BookingError::ResourceUnavailable)` - Resource is not published
    /// - `Err(BookingError::ResourceConflict)` - Slot overlaps a live booking of the resource
    /// - `Err(BookingError::UserConflict)` - Slot overlaps one of the requester's live bookings
    pub async fn create(
        &self,
        requester: &User,
        param: CreateBookingParam,
    ) -> Result<Booking, AppError> {
        if param.window.start < Utc::now() {
            return Err(AppError::BadRequest("Cannot book in the past.".to_string()));
        }

        let _guard = self
            .locks
            .lock_resource_and_user(param.resource_id, param.user_id)
            .await;
        let txn = self.db.begin().await?;

        let resource = ResourceRepository::new(&txn)
            .find_by_id(param.resource_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Resource not found".to_string()))?;
        if !resource.is_published() {
            return Err(BookingError::ResourceUnavailable.into());
        }

        let booking_repo = BookingRepository::new(&txn);
        let resource_conflicts = booking_repo
            .find_resource_conflicts(param.resource_id, &param.window, None)
            .await?;
        if !resource_conflicts.is_empty() {
            return Err(BookingError::ResourceConflict(resource_conflicts.len()).into());
        }
        let user_conflicts = booking_repo
            .find_user_conflicts(param.user_id, &param.window, None)
            .await?;
        if !user_conflicts.is_empty() {
            return Err(BookingError::UserConflict(user_conflicts.len()).into());
        }

        let status = if resource.requires_approval {
            BookingStatus::Pending
        } else {
            BookingStatus::Approved
        };
        let booking = booking_repo.create(param, status).await?;

        NotificationRepository::new(&txn)
            .create_many(creation_notifications(requester, &resource, &booking))
            .await?;

        txn.commit().await?;

        tracing::info!(
            "User {} booked resource {} as booking {} ({})",
            requester.id,
            resource.id,
            booking.id,
            booking.status
        );

        Ok(booking)
    }

    /// Approves a pending booking, re-checking resource conflicts against other live bookings.
    pub async fn approve(&self, booking_id: i32, actor: &User) -> Result<Booking, AppError> {
        self.transition(booking_id, BookingStatus::Approved, actor)
            .await
    }

    /// Rejects a pending booking.
    pub async fn reject(&self, booking_id: i32, actor: &User) -> Result<Booking, AppError> {
        self.transition(booking_id, BookingStatus::Rejected, actor)
            .await
    }

    /// Cancels a pending or approved booking.
    pub async fn cancel(&self, booking_id: i32, actor: &User) -> Result<Booking, AppError> {
        self.transition(booking_id, BookingStatus::Cancelled, actor)
            .await
    }

    /// Applies a lifecycle transition with its notifications in one transaction.
    ///
    /// # Returns
    /// - `Ok(Booking)` - Updated booking
    /// - `Err(AppError::NotFound)` - Booking does not exist
    /// - `Err(BookingError::InvalidTransition)` - Current status does not allow `to`
    /// - `Err(BookingError::ResourceConflict)` - Approval would overlap a live booking
    async fn transition(
        &self,
        booking_id: i32,
        to: BookingStatus,
        actor: &User,
    ) -> Result<Booking, AppError> {
        let booking = BookingRepository::new(self.db)
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        let _guard = self.locks.lock_resource(booking.resource_id).await;
        let txn = self.db.begin().await?;
        let booking_repo = BookingRepository::new(&txn);

        // Re-read under the lock; the status may have moved since.
        let booking = booking_repo
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;
        if !booking.status.can_transition_to(to) {
            return Err(BookingError::InvalidTransition {
                from: booking.status,
                to,
            }
            .into());
        }

        if to == BookingStatus::Approved {
            let window = BookingWindow::new(booking.start_datetime, booking.end_datetime)?;
            let conflicts = booking_repo
                .find_resource_conflicts(booking.resource_id, &window, Some(booking.id))
                .await?;
            if !conflicts.is_empty() {
                return Err(BookingError::ResourceConflict(conflicts.len()).into());
            }
        }

        let updated = booking_repo
            .transition(booking.id, to)
            .await?
            .ok_or(BookingError::InvalidTransition {
                from: booking.status,
                to,
            })?;

        let resource = ResourceRepository::new(&txn)
            .find_by_id(updated.resource_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Resource not found".to_string()))?;
        NotificationRepository::new(&txn)
            .create_many(transition_notifications(actor, &resource, &updated))
            .await?;

        txn.commit().await?;

        tracing::info!(
            "User {} moved booking {} from {} to {}",
            actor.id,
            updated.id,
            booking.status,
            updated.status
        );

        Ok(updated)
    }

    /// Reports live bookings that would conflict with a proposed window.
    ///
    /// Read-only pre-check; `create` performs the authoritative check.
    pub async fn check_conflict(
        &self,
        user_id: i32,
        resource_id: i32,
        window: BookingWindow,
    ) -> Result<ConflictReport, AppError> {
        if ResourceRepository::new(self.db)
            .find_by_id(resource_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Resource not found".to_string()));
        }

        let repo = BookingRepository::new(self.db);
        let resource_conflicts = repo
            .find_resource_conflicts(resource_id, &window, None)
            .await?;
        let user_conflicts = repo.find_user_conflicts(user_id, &window, None).await?;
        let user_conflicts = repo.with_details(user_conflicts).await?;

        Ok(ConflictReport {
            resource_conflicts,
            user_conflicts,
        })
    }
}

fn format_day(at: DateTime<Utc>) -> String {
    at.format("%B %d, %Y").to_string()
}

fn creation_notifications(
    requester: &User,
    resource: &Resource,
    booking: &Booking,
) -> Vec<CreateNotificationParam> {
    let day = format_day(booking.start_datetime);

    match booking.status {
        BookingStatus::Approved => vec![
            CreateNotificationParam::new(
                requester.id,
                NotificationKind::BookingConfirmed,
                "Booking Confirmed",
                format!(
                    "Your booking for {} on {} has been confirmed.",
                    resource.title, day
                ),
            )
            .link(BOOKINGS_LINK),
            CreateNotificationParam::new(
                resource.owner_id,
                NotificationKind::BookingConfirmed,
                "New Booking",
                format!("{} has booked {} on {}.", requester.name, resource.title, day),
            )
            .link(BOOKINGS_LINK),
        ],
        _ => vec![
            CreateNotificationParam::new(
                requester.id,
                NotificationKind::BookingPending,
                "Booking Pending Approval",
                format!(
                    "Your booking request for {} is pending approval.",
                    resource.title
                ),
            )
            .link(BOOKINGS_LINK),
            CreateNotificationParam::new(
                resource.owner_id,
                NotificationKind::BookingPending,
                "Booking Request Pending",
                format!(
                    "{} has requested to book {} on {}.",
                    requester.name, resource.title, day
                ),
            )
            .link(MANAGE_LINK),
        ],
    }
}

fn transition_notifications(
    actor: &User,
    resource: &Resource,
    booking: &Booking,
) -> Vec<CreateNotificationParam> {
    match booking.status {
        BookingStatus::Approved => vec![CreateNotificationParam::new(
            booking.user_id,
            NotificationKind::BookingApproved,
            "Booking Approved",
            format!(
                "Your booking request for {} has been approved.",
                resource.title
            ),
        )
        .link(BOOKINGS_LINK)],
        BookingStatus::Rejected => vec![CreateNotificationParam::new(
            booking.user_id,
            NotificationKind::BookingRejected,
            "Booking Rejected",
            format!(
                "Your booking request for {} has been rejected.",
                resource.title
            ),
        )
        .link(BOOKINGS_LINK)],
        BookingStatus::Cancelled => vec![
            CreateNotificationParam::new(
                resource.owner_id,
                NotificationKind::BookingCancelled,
                "Booking Cancelled",
                format!(
                    "{} has cancelled a booking for {} on {}.",
                    actor.name,
                    resource.title,
                    format_day(booking.start_datetime)
                ),
            )
            .link(MANAGE_LINK),
            CreateNotificationParam::new(
                booking.user_id,
                NotificationKind::BookingCancelled,
                "Booking Cancelled",
                format!("Your booking for {} has been cancelled.", resource.title),
            )
            .link(BOOKINGS_LINK),
        ],
        BookingStatus::Pending | BookingStatus::Completed => Vec::new(),
    }
}
