use crate::server::{
    error::{auth::AuthError, AppError},
    service::notification::{NotificationService, MAX_RECENT_LIMIT},
};
use test_utils::{builder::TestBuilder, factory};

mod list_and_mark_read;
