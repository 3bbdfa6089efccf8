//! Message domain models and thread identifiers.

use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

use crate::{
    model::message::{MessageDto, ThreadSummaryDto},
    server::{error::AppError, model::user::User},
};

/// Identifies a conversation between two users.
///
/// Rendered as `resource-{resource_id}-{requester_id}` for a requester asking a
/// resource owner, or `booking-{booking_id}` for the two parties of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreadId {
    Resource { resource_id: i32, requester_id: i32 },
    Booking { booking_id: i32 },
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resource {
                resource_id,
                requester_id,
            } => write!(f, "resource-{}-{}", resource_id, requester_id),
            Self::Booking { booking_id } => write!(f, "booking-{}", booking_id),
        }
    }
}

impl FromStr for ThreadId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::BadRequest(format!("Invalid thread id '{}'", s));
        let parts: Vec<&str> = s.split('-').collect();

        match parts.as_slice() {
            ["resource", resource_id, requester_id] => Ok(Self::Resource {
                resource_id: resource_id.parse().map_err(|_| invalid())?,
                requester_id: requester_id.parse().map_err(|_| invalid())?,
            }),
            ["booking", booking_id] => Ok(Self::Booking {
                booking_id: booking_id.parse().map_err(|_| invalid())?,
            }),
            _ => Err(invalid()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: i32,
    pub thread_id: String,
    pub sender_id: i32,
    pub receiver_id: i32,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn from_entity(entity: entity::message::Model) -> Self {
        Self {
            id: entity.id,
            thread_id: entity.thread_id,
            sender_id: entity.sender_id,
            receiver_id: entity.receiver_id,
            content: entity.content,
            read: entity.read,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> MessageDto {
        MessageDto {
            id: self.id,
            thread_id: self.thread_id,
            sender_id: self.sender_id,
            receiver_id: self.receiver_id,
            content: self.content,
            read: self.read,
            created_at: self.created_at,
        }
    }
}

/// Latest state of one of a user's threads.
#[derive(Debug, Clone)]
pub struct ThreadSummary {
    pub thread_id: String,
    pub other_user: User,
    pub last_message: Message,
    pub unread_count: u64,
}

impl ThreadSummary {
    pub fn into_dto(self) -> ThreadSummaryDto {
        ThreadSummaryDto {
            thread_id: self.thread_id,
            other_user: self.other_user.into_dto(),
            last_message: self.last_message.into_dto(),
            unread_count: self.unread_count,
        }
    }
}

/// The two users taking part in a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participants {
    pub first: i32,
    pub second: i32,
}

impl Participants {
    pub fn contains(&self, user_id: i32) -> bool {
        self.first == user_id || self.second == user_id
    }

    /// The participant who is not `user_id`.
    pub fn other(&self, user_id: i32) -> i32 {
        if self.first == user_id {
            self.second
        } else {
            self.first
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateMessageParam {
    pub thread_id: ThreadId,
    pub sender_id: i32,
    pub receiver_id: i32,
    pub content: String,
}
