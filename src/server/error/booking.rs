use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::{error::error_response, model::booking::BookingStatus};

/// Booking and review rule violations.
///
/// None of these leave partial state behind: the surrounding transaction is rolled back
/// before the error reaches the caller.
#[derive(Error, Debug)]
pub enum BookingError {
    /// Proposed interval overlaps live bookings on the same resource.
    #[error("Time slot conflicts with {0} existing booking(s) for this resource")]
    ResourceConflict(usize),

    /// Proposed interval overlaps the requesting user's other live bookings.
    #[error("You already have {0} booking(s) overlapping this time slot")]
    UserConflict(usize),

    /// Requested status change is not allowed from the booking's current status.
    #[error("Cannot change booking from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// Resource is not published and cannot be booked.
    #[error("This resource is not available for booking")]
    ResourceUnavailable,

    /// User already reviewed this resource.
    #[error("You have already reviewed this resource")]
    AlreadyReviewed,

    /// User has no completed booking of the resource.
    #[error("You can only review resources you have completed a booking for")]
    NotEligibleForReview,
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotEligibleForReview => StatusCode::FORBIDDEN,
            _ => StatusCode::CONFLICT,
        };

        error_response(status, self.to_string())
    }
}
