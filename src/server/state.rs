//! Application state shared across all request handlers.
//!
//! Initialized once during startup and cloned into each handler through Axum's state
//! extraction. Every field is cheap to clone: the connection is a pool and the services
//! hold their shared data behind `Arc`.

use sea_orm::DatabaseConnection;

use crate::server::service::{
    admin::code::AdminCodeService, booking::BookingLocks, chatbot::client::ModelClient,
};

#[derive(Clone)]
pub struct AppState {
    /// Connection pool for the SQLite database.
    pub db: DatabaseConnection,

    /// Single-use code that lets the first registrant become an admin.
    pub admin_code_service: AdminCodeService,

    /// In-process locks serializing conflict checks with the writes that depend on them.
    pub booking_locks: BookingLocks,

    /// Language model client; `None` when no API key is configured.
    pub chatbot: Option<ModelClient>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        admin_code_service: AdminCodeService,
        chatbot: Option<ModelClient>,
    ) -> Self {
        Self {
            db,
            admin_code_service,
            booking_locks: BookingLocks::new(),
            chatbot,
        }
    }
}
