//! Message factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct MessageFactory<'a> {
    db: &'a DatabaseConnection,
    thread_id: String,
    sender_id: i32,
    receiver_id: i32,
    content: String,
    read: bool,
}

impl<'a> MessageFactory<'a> {
    /// Defaults to an unread message with placeholder content.
    pub fn new(
        db: &'a DatabaseConnection,
        thread_id: impl Into<String>,
        sender_id: i32,
        receiver_id: i32,
    ) -> Self {
        Self {
            db,
            thread_id: thread_id.into(),
            sender_id,
            receiver_id,
            content: "Hello".to_string(),
            read: false,
        }
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    pub async fn build(self) -> Result<entity::message::Model, DbErr> {
        entity::message::ActiveModel {
            thread_id: ActiveValue::Set(self.thread_id),
            sender_id: ActiveValue::Set(self.sender_id),
            receiver_id: ActiveValue::Set(self.receiver_id),
            content: ActiveValue::Set(self.content),
            read: ActiveValue::Set(self.read),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_message(
    db: &DatabaseConnection,
    thread_id: &str,
    sender_id: i32,
    receiver_id: i32,
) -> Result<entity::message::Model, DbErr> {
    MessageFactory::new(db, thread_id, sender_id, receiver_id)
        .build()
        .await
}
