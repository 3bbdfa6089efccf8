use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct BookingDto {
    pub id: i32,
    pub resource_id: i32,
    pub user_id: i32,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub status: String,
    pub notes: Option<String>,
    pub recurrence: String,
    pub created_at: DateTime<Utc>,
}

/// Booking joined with the display fields of its resource and holder.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct BookingDetailDto {
    pub booking: BookingDto,
    pub resource_title: String,
    pub resource_location: String,
    pub user_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct BookingOverviewDto {
    pub pending: Vec<BookingDetailDto>,
    pub upcoming: Vec<BookingDetailDto>,
    pub past: Vec<BookingDetailDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CreateBookingDto {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, UTC
    pub start_time: String,
    /// `HH:MM`, UTC
    pub end_time: String,
    pub notes: Option<String>,
    /// `none` (default), `daily` or `weekly`.
    pub recurrence: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CheckConflictDto {
    pub resource_id: i32,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ConflictCheckDto {
    pub has_resource_conflict: bool,
    pub resource_conflicting_count: usize,
    pub has_user_conflict: bool,
    pub user_conflicts: Vec<BookingDetailDto>,
}
