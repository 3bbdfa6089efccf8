use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum ChatbotError {
    /// No API key was configured.
    #[error("The query assistant is not configured")]
    NotConfigured,

    /// Generated SQL failed the read-only safety checks.
    #[error("{0}")]
    UnsafeQuery(String),

    /// Generated SQL passed the checks but the database rejected it.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Model name is unknown to the API; the next candidate is tried.
    #[error("Model {0} not found")]
    ModelNotFound(String),

    /// Model is rate limited; retried with backoff.
    #[error("Model {0} is rate limited")]
    RateLimited(String),

    /// Any other non-success response from the API.
    #[error("Model API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// API reply had no text candidate.
    #[error("Model API returned an empty response")]
    EmptyResponse,

    /// Every candidate model was missing or exhausted its retries.
    #[error("No model available to answer the question")]
    NoModelAvailable,

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl IntoResponse for ChatbotError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::UnsafeQuery(_) | Self::QueryFailed(_) => StatusCode::BAD_REQUEST,
            _ => {
                tracing::error!("{}", self);
                StatusCode::BAD_GATEWAY
            }
        };

        error_response(status, self.to_string())
    }
}
