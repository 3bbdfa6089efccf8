use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct NotificationDto {
    pub id: i32,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct UnreadCountDto {
    pub count: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, IntoParams)]
pub struct RecentQueryDto {
    /// Number of notifications, 5 when omitted, at most 50.
    pub limit: Option<u64>,
}
