use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::UserDto;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct MessageDto {
    pub id: i32,
    pub thread_id: String,
    pub sender_id: i32,
    pub receiver_id: i32,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ThreadSummaryDto {
    pub thread_id: String,
    pub other_user: UserDto,
    pub last_message: MessageDto,
    pub unread_count: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ThreadDto {
    pub thread_id: String,
    pub other_user: UserDto,
    pub messages: Vec<MessageDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct StartThreadDto {
    pub thread_id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct SendMessageDto {
    pub content: String,
}
