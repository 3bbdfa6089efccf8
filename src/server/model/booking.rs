//! Booking domain models, the status lifecycle and parameters.

use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

use crate::{
    model::booking::{
        BookingDetailDto, BookingDto, BookingOverviewDto, ConflictCheckDto, CreateBookingDto,
    },
    server::{
        error::AppError,
        util::parse::{non_empty, parse_date_time},
    },
};

/// Booking status lifecycle.
///
/// ```text
/// pending ──► approved ──► completed
///    │  │        │
///    │  └──► rejected
///    └─────────┴──► cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Statuses that hold a time slot and take part in conflict checks.
    pub const LIVE: [BookingStatus; 2] = [Self::Pending, Self::Approved];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    pub fn is_live(&self) -> bool {
        Self::LIVE.contains(self)
    }

    /// Statuses from which a transition to `to` is permitted.
    pub fn sources_for(to: BookingStatus) -> &'static [BookingStatus] {
        match to {
            Self::Approved | Self::Rejected => &[Self::Pending],
            Self::Cancelled => &[Self::Pending, Self::Approved],
            Self::Completed => &[Self::Approved],
            Self::Pending => &[],
        }
    }

    pub fn can_transition_to(&self, to: BookingStatus) -> bool {
        Self::sources_for(to).contains(self)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(AppError::BadRequest(format!(
                "Invalid booking status '{}'",
                other
            ))),
        }
    }
}

/// Requested repetition. Stored with the booking; occurrences are not expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

impl FromStr for Recurrence {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(Self::None),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            other => Err(AppError::BadRequest(format!(
                "Invalid recurrence '{}'",
                other
            ))),
        }
    }
}

/// Half-open reservation interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BookingWindow {
    /// Builds a window, rejecting empty or inverted intervals.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, AppError> {
        if start >= end {
            return Err(AppError::BadRequest(
                "End time must be after start time.".to_string(),
            ));
        }

        Ok(Self { start, end })
    }

    /// Builds a window from a `YYYY-MM-DD` date and `HH:MM` start and end times in UTC.
    pub fn from_parts(date: &str, start_time: &str, end_time: &str) -> Result<Self, AppError> {
        Self::new(
            parse_date_time(date, start_time)?,
            parse_date_time(date, end_time)?,
        )
    }

    /// Half-open overlap test. Touching intervals do not overlap.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end && end > self.start
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: i32,
    pub resource_id: i32,
    pub user_id: i32,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub recurrence: Recurrence,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn into_dto(self) -> BookingDto {
        BookingDto {
            id: self.id,
            resource_id: self.resource_id,
            user_id: self.user_id,
            start_datetime: self.start_datetime,
            end_datetime: self.end_datetime,
            status: self.status.to_string(),
            notes: self.notes,
            recurrence: self.recurrence.as_str().to_string(),
            created_at: self.created_at,
        }
    }

    pub fn from_entity(entity: entity::booking::Model) -> Self {
        Self {
            id: entity.id,
            resource_id: entity.resource_id,
            user_id: entity.user_id,
            start_datetime: entity.start_datetime,
            end_datetime: entity.end_datetime,
            status: entity.status.parse().unwrap_or_default(),
            notes: entity.notes,
            recurrence: entity.recurrence.parse().unwrap_or_default(),
            created_at: entity.created_at,
        }
    }
}

/// Booking with display fields of its resource and holder.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDetail {
    pub booking: Booking,
    pub resource_title: String,
    pub resource_location: String,
    pub resource_owner_id: i32,
    pub user_name: String,
}

impl BookingDetail {
    pub fn into_dto(self) -> BookingDetailDto {
        BookingDetailDto {
            booking: self.booking.into_dto(),
            resource_title: self.resource_title,
            resource_location: self.resource_location,
            user_name: self.user_name,
        }
    }
}

/// Bookings grouped for display.
#[derive(Debug, Clone, Default)]
pub struct BookingOverview {
    pub pending: Vec<BookingDetail>,
    /// Approved and not yet started.
    pub upcoming: Vec<BookingDetail>,
    pub past: Vec<BookingDetail>,
}

impl BookingOverview {
    pub fn group(bookings: Vec<BookingDetail>, now: DateTime<Utc>) -> Self {
        let mut overview = Self::default();

        for detail in bookings {
            match detail.booking.status {
                BookingStatus::Pending => overview.pending.push(detail),
                BookingStatus::Approved if detail.booking.start_datetime > now => {
                    overview.upcoming.push(detail)
                }
                _ => overview.past.push(detail),
            }
        }

        overview
    }

    pub fn into_dto(self) -> BookingOverviewDto {
        BookingOverviewDto {
            pending: self.pending.into_iter().map(|b| b.into_dto()).collect(),
            upcoming: self.upcoming.into_iter().map(|b| b.into_dto()).collect(),
            past: self.past.into_iter().map(|b| b.into_dto()).collect(),
        }
    }
}

/// Live bookings overlapping a proposed window, split by scope.
#[derive(Debug, Clone, Default)]
pub struct ConflictReport {
    /// Same resource, any user.
    pub resource_conflicts: Vec<Booking>,
    /// Same user, any resource.
    pub user_conflicts: Vec<BookingDetail>,
}

impl ConflictReport {
    pub fn has_resource_conflict(&self) -> bool {
        !self.resource_conflicts.is_empty()
    }

    pub fn has_user_conflict(&self) -> bool {
        !self.user_conflicts.is_empty()
    }

    pub fn has_conflict(&self) -> bool {
        self.has_resource_conflict() || self.has_user_conflict()
    }

    pub fn into_dto(self) -> ConflictCheckDto {
        ConflictCheckDto {
            has_resource_conflict: self.has_resource_conflict(),
            resource_conflicting_count: self.resource_conflicts.len(),
            has_user_conflict: self.has_user_conflict(),
            user_conflicts: self
                .user_conflicts
                .into_iter()
                .map(BookingDetail::into_dto)
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateBookingParam {
    pub resource_id: i32,
    pub user_id: i32,
    pub window: BookingWindow,
    pub notes: Option<String>,
    pub recurrence: Recurrence,
}

impl CreateBookingParam {
    pub fn from_dto(resource_id: i32, user_id: i32, dto: CreateBookingDto) -> Result<Self, AppError> {
        Ok(Self {
            resource_id,
            user_id,
            window: BookingWindow::from_parts(&dto.date, &dto.start_time, &dto.end_time)?,
            notes: non_empty(dto.notes),
            recurrence: dto.recurrence.as_deref().unwrap_or_default().parse()?,
        })
    }
}
