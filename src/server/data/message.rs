//! Message data repository.
//!
//! Messages are grouped by their `thread_id` string; thread summaries are assembled
//! here from the latest message per thread and the per-thread unread count.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use std::collections::HashMap;

use crate::server::{
    data::user::UserRepository,
    model::message::{CreateMessageParam, Message, ThreadSummary},
};

pub struct MessageRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MessageRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an unread message.
    pub async fn create(&self, param: CreateMessageParam) -> Result<Message, DbErr> {
        let entity = entity::message::ActiveModel {
            thread_id: ActiveValue::Set(param.thread_id.to_string()),
            sender_id: ActiveValue::Set(param.sender_id),
            receiver_id: ActiveValue::Set(param.receiver_id),
            content: ActiveValue::Set(param.content),
            read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Message::from_entity(entity))
    }

    /// Gets a thread's messages in chronological order.
    pub async fn get_thread(&self, thread_id: &str) -> Result<Vec<Message>, DbErr> {
        let entities = entity::prelude::Message::find()
            .filter(entity::message::Column::ThreadId.eq(thread_id))
            .order_by_asc(entity::message::Column::CreatedAt)
            .order_by_asc(entity::message::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Message::from_entity).collect())
    }

    /// Marks messages in a thread addressed to `receiver_id` as read.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of messages newly marked read
    pub async fn mark_thread_read(&self, thread_id: &str, receiver_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Message::update_many()
            .col_expr(entity::message::Column::Read, Expr::value(true))
            .filter(entity::message::Column::ThreadId.eq(thread_id))
            .filter(entity::message::Column::ReceiverId.eq(receiver_id))
            .filter(entity::message::Column::Read.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Counts unread messages addressed to the user across all threads.
    pub async fn count_unread(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Message::find()
            .filter(entity::message::Column::ReceiverId.eq(user_id))
            .filter(entity::message::Column::Read.eq(false))
            .count(self.db)
            .await
    }

    /// Summarizes every thread the user takes part in, most recently active first.
    ///
    /// Threads whose other participant no longer exists are skipped.
    pub async fn get_threads_for_user(&self, user_id: i32) -> Result<Vec<ThreadSummary>, DbErr> {
        let entities = entity::prelude::Message::find()
            .filter(
                Condition::any()
                    .add(entity::message::Column::SenderId.eq(user_id))
                    .add(entity::message::Column::ReceiverId.eq(user_id)),
            )
            .order_by_desc(entity::message::Column::CreatedAt)
            .order_by_desc(entity::message::Column::Id)
            .all(self.db)
            .await?;

        // Newest first, so the first message seen per thread is its latest.
        let mut order: Vec<String> = Vec::new();
        let mut latest: HashMap<String, Message> = HashMap::new();
        let mut unread: HashMap<String, u64> = HashMap::new();
        for message in entities.into_iter().map(Message::from_entity) {
            if message.receiver_id == user_id && !message.read {
                *unread.entry(message.thread_id.clone()).or_default() += 1;
            }
            if !latest.contains_key(&message.thread_id) {
                order.push(message.thread_id.clone());
                latest.insert(message.thread_id.clone(), message);
            }
        }

        let other_ids = latest
            .values()
            .map(|m| {
                if m.sender_id == user_id {
                    m.receiver_id
                } else {
                    m.sender_id
                }
            })
            .collect();
        let users = UserRepository::new(self.db).find_by_ids(other_ids).await?;

        Ok(order
            .into_iter()
            .filter_map(|thread_id| {
                let last_message = latest.remove(&thread_id)?;
                let other_id = if last_message.sender_id == user_id {
                    last_message.receiver_id
                } else {
                    last_message.sender_id
                };
                let other_user = users.get(&other_id)?.clone();
                Some(ThreadSummary {
                    unread_count: unread.get(&thread_id).copied().unwrap_or(0),
                    thread_id,
                    other_user,
                    last_message,
                })
            })
            .collect())
    }
}
