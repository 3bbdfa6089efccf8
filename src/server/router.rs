use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        admin::{self, ADMIN_TAG},
        auth::{self, AUTH_TAG},
        booking::{self, BOOKING_TAG},
        chatbot::{self, CHATBOT_TAG},
        dashboard::{self, DASHBOARD_TAG},
        message::{self, MESSAGE_TAG},
        notification::{self, NOTIFICATION_TAG},
        profile::{self, PROFILE_TAG},
        resource::{self, RESOURCE_TAG},
        review::{self, REVIEW_TAG},
    },
    error::AppError,
    state::AppState,
};

/// Requests allowed per peer IP on the auth routes before throttling.
const AUTH_BURST: u32 = 10;
/// Seconds to replenish one auth request.
const AUTH_REPLENISH_SECS: u64 = 6;

#[derive(OpenApi)]
#[openapi(
    info(title = "Campus Hub API", description = "Campus resource booking"),
    paths(
        auth::register,
        auth::login,
        auth::logout,
        auth::get_user,
        profile::get_profile,
        profile::update_profile,
        resource::browse_resources,
        resource::my_resources,
        resource::get_resource,
        resource::create_resource,
        resource::update_resource,
        resource::delete_resource,
        booking::list_bookings,
        booking::manage_bookings,
        booking::create_booking,
        booking::approve_booking,
        booking::reject_booking,
        booking::cancel_booking,
        booking::check_conflict,
        booking::pending_approvals,
        review::create_review,
        review::update_review,
        review::delete_review,
        review::list_reviews,
        message::list_threads,
        message::get_thread,
        message::start_thread,
        message::send_message,
        notification::list_notifications,
        notification::recent_notifications,
        notification::unread_count,
        notification::mark_all_read,
        notification::mark_read,
        dashboard::get_dashboard,
        admin::get_stats,
        admin::list_users,
        admin::delete_user,
        admin::update_user_role,
        admin::list_resources,
        admin::archive_resource,
        admin::publish_resource,
        chatbot::ask,
    ),
    tags(
        (name = AUTH_TAG, description = "Registration, login and session"),
        (name = PROFILE_TAG, description = "Current user's profile"),
        (name = RESOURCE_TAG, description = "Bookable resources"),
        (name = BOOKING_TAG, description = "Bookings and their lifecycle"),
        (name = REVIEW_TAG, description = "Resource reviews"),
        (name = MESSAGE_TAG, description = "Conversations between users"),
        (name = NOTIFICATION_TAG, description = "In-app notifications"),
        (name = DASHBOARD_TAG, description = "Personal dashboard"),
        (name = ADMIN_TAG, description = "Site administration"),
        (name = CHATBOT_TAG, description = "Natural-language data questions"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Result<Router<AppState>, AppError> {
    let governor = GovernorConfigBuilder::default()
        .per_second(AUTH_REPLENISH_SECS)
        .burst_size(AUTH_BURST)
        .finish()
        .ok_or_else(|| AppError::InternalError("Invalid rate limit configuration".to_string()))?;

    let auth_routes = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .layer(GovernorLayer::new(Arc::new(governor)));

    let routes = Router::new()
        .route("/api/auth/logout", get(auth::logout))
        .route("/api/auth/user", get(auth::get_user))
        .route(
            "/api/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route(
            "/api/resources",
            get(resource::browse_resources).post(resource::create_resource),
        )
        .route("/api/resources/mine", get(resource::my_resources))
        .route(
            "/api/resources/{resource_id}",
            get(resource::get_resource)
                .put(resource::update_resource)
                .delete(resource::delete_resource),
        )
        .route(
            "/api/resources/{resource_id}/bookings",
            post(booking::create_booking),
        )
        .route(
            "/api/resources/{resource_id}/reviews",
            post(review::create_review),
        )
        .route(
            "/api/resources/{resource_id}/messages",
            post(message::start_thread),
        )
        .route("/api/bookings", get(booking::list_bookings))
        .route("/api/bookings/manage", get(booking::manage_bookings))
        .route("/api/bookings/check-conflict", post(booking::check_conflict))
        .route(
            "/api/bookings/{booking_id}/approve",
            post(booking::approve_booking),
        )
        .route(
            "/api/bookings/{booking_id}/reject",
            post(booking::reject_booking),
        )
        .route(
            "/api/bookings/{booking_id}/cancel",
            post(booking::cancel_booking),
        )
        .route(
            "/api/reviews/{review_id}",
            put(review::update_review).delete(review::delete_review),
        )
        .route("/api/messages", get(message::list_threads))
        .route(
            "/api/messages/{thread_id}",
            get(message::get_thread).post(message::send_message),
        )
        .route("/api/notifications", get(notification::list_notifications))
        .route(
            "/api/notifications/recent",
            get(notification::recent_notifications),
        )
        .route(
            "/api/notifications/unread-count",
            get(notification::unread_count),
        )
        .route(
            "/api/notifications/read-all",
            post(notification::mark_all_read),
        )
        .route(
            "/api/notifications/{notification_id}/read",
            post(notification::mark_read),
        )
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .route("/api/admin/stats", get(admin::get_stats))
        .route("/api/admin/users", get(admin::list_users))
        .route(
            "/api/admin/users/{user_id}",
            axum::routing::delete(admin::delete_user),
        )
        .route(
            "/api/admin/users/{user_id}/role",
            put(admin::update_user_role),
        )
        .route("/api/admin/resources", get(admin::list_resources))
        .route(
            "/api/admin/resources/{resource_id}/archive",
            post(admin::archive_resource),
        )
        .route(
            "/api/admin/resources/{resource_id}/publish",
            post(admin::publish_resource),
        )
        .route("/api/admin/approvals", get(booking::pending_approvals))
        .route("/api/admin/reviews", get(review::list_reviews))
        .route("/api/admin/chatbot", post(chatbot::ask));

    Ok(Router::new()
        .merge(auth_routes)
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()))
}
