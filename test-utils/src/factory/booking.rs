//! Booking factory for creating reservations.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test bookings of a resource by a user.
pub struct BookingFactory<'a> {
    db: &'a DatabaseConnection,
    resource_id: i32,
    user_id: i32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    status: String,
    notes: Option<String>,
}

impl<'a> BookingFactory<'a> {
    /// Creates a new BookingFactory with default values.
    ///
    /// Defaults:
    /// - window: one hour starting one day from now
    /// - status: `"approved"`
    /// - notes: `None`
    pub fn new(db: &'a DatabaseConnection, resource_id: i32, user_id: i32) -> Self {
        let start = Utc::now() + Duration::days(1);
        Self {
            db,
            resource_id,
            user_id,
            start,
            end: start + Duration::hours(1),
            status: "approved".to_string(),
            notes: None,
        }
    }

    /// Sets the half-open interval `[start, end)` of the reservation.
    pub fn window(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub async fn build(self) -> Result<entity::booking::Model, DbErr> {
        let now = Utc::now();
        entity::booking::ActiveModel {
            resource_id: ActiveValue::Set(self.resource_id),
            user_id: ActiveValue::Set(self.user_id),
            start_datetime: ActiveValue::Set(self.start),
            end_datetime: ActiveValue::Set(self.end),
            status: ActiveValue::Set(self.status),
            notes: ActiveValue::Set(self.notes),
            recurrence: ActiveValue::Set("none".to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an approved one-hour booking starting one day from now.
pub async fn create_booking(
    db: &DatabaseConnection,
    resource_id: i32,
    user_id: i32,
) -> Result<entity::booking::Model, DbErr> {
    BookingFactory::new(db, resource_id, user_id).build().await
}
