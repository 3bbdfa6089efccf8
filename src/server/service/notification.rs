//! Notification service.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::notification::NotificationRepository,
    error::{auth::AuthError, AppError},
    model::notification::Notification,
};

/// Number of notifications shown in the header dropdown when no limit is given.
pub const RECENT_LIMIT: u64 = 5;
/// Largest limit a caller may request.
pub const MAX_RECENT_LIMIT: u64 = 50;

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// All of the user's notifications, newest first, then marks them read.
    ///
    /// The returned list reflects read flags as they were before this call.
    pub async fn list_and_mark_read(&self, user_id: i32) -> Result<Vec<Notification>, AppError> {
        let repo = NotificationRepository::new(self.db);
        let notifications = repo.get_for_user(user_id, None).await?;
        repo.mark_all_read(user_id).await?;

        Ok(notifications)
    }

    /// The user's newest notifications without marking them read.
    ///
    /// `limit` defaults to `RECENT_LIMIT` and is clamped to `1..=MAX_RECENT_LIMIT`.
    pub async fn recent(
        &self,
        user_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<Notification>, AppError> {
        let limit = limit.unwrap_or(RECENT_LIMIT).clamp(1, MAX_RECENT_LIMIT);

        Ok(NotificationRepository::new(self.db)
            .get_for_user(user_id, Some(limit))
            .await?)
    }

    pub async fn unread_count(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .count_unread(user_id)
            .await?)
    }

    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .mark_all_read(user_id)
            .await?)
    }

    /// Marks one of the user's notifications read.
    ///
    /// # Returns
    /// - `Ok(())` - Marked read
    /// - `Err(AppError::NotFound)` - No such notification
    /// - `Err(AuthError::AccessDenied)` - Notification belongs to another user
    pub async fn mark_read(&self, notification_id: i32, user_id: i32) -> Result<(), AppError> {
        let repo = NotificationRepository::new(self.db);
        let notification = repo
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

        if notification.user_id != user_id {
            return Err(AuthError::AccessDenied(
                user_id,
                format!("Notification {} belongs to another user", notification_id),
            )
            .into());
        }

        repo.mark_read(notification_id).await?;

        Ok(())
    }
}
