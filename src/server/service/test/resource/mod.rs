use super::as_user;
use crate::server::{
    error::{auth::AuthError, AppError},
    model::resource::{ResourceQuery, ResourceSort, ResourceStatus},
    service::resource::ResourceService,
};
use test_utils::{builder::TestBuilder, factory};
