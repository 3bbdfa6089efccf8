use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user id stored in the session.
    #[error("No user in session")]
    UserNotInSession,

    /// Session references a user that no longer exists.
    #[error("User {0} from session not found in database")]
    UserNotInDatabase(i32),

    /// Email/password pair did not match a stored account.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Authenticated user lacks the role or ownership required for the action.
    ///
    /// The reason is logged; clients receive a generic message.
    #[error("Access denied for user {0}: {1}")]
    AccessDenied(i32, String),

    /// Registration or profile edit tried to claim an email already in use.
    #[error("Email already registered")]
    EmailTaken,
}

/// Converts authentication errors into HTTP responses.
///
/// - `UserNotInSession` / `UserNotInDatabase` → 401 Unauthorized
/// - `InvalidCredentials` → 401 Unauthorized
/// - `AccessDenied` → 403 Forbidden
/// - `EmailTaken` → 409 Conflict
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                tracing::debug!("{}", self);
                error_response(
                    StatusCode::UNAUTHORIZED,
                    "Please log in to access this page.".to_string(),
                )
            }
            Self::InvalidCredentials => {
                error_response(StatusCode::UNAUTHORIZED, self.to_string())
            }
            Self::AccessDenied(_, _) => {
                tracing::debug!("{}", self);
                error_response(
                    StatusCode::FORBIDDEN,
                    "You do not have permission to perform this action.".to_string(),
                )
            }
            Self::EmailTaken => error_response(StatusCode::CONFLICT, self.to_string()),
        }
    }
}
