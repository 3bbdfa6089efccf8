use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        admin::AdminStatsDto,
        api::{ErrorDto, SuccessDto},
        resource::{ResourceDto, ResourceSummaryDto},
        user::{UpdateRoleDto, UserDto},
    },
    server::{
        controller::resource::summaries_to_dto,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            resource::ResourceStatus,
            user::{Role, User},
        },
        service::admin::AdminService,
        state::AppState,
    },
};

/// Tag for grouping admin endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

/// Get site-wide figures for the admin dashboard.
///
/// # Access Control
/// - `Admin` - Only admins
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Site statistics", body = AdminStatsDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_stats(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let stats = AdminService::new(&state.db).stats().await?;

    Ok((StatusCode::OK, Json(stats.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "All users, newest first", body = Vec<UserDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_users(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let users = AdminService::new(&state.db).users().await?;
    let dto: Vec<UserDto> = users.into_iter().map(User::into_dto).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Delete a user and everything they own.
///
/// # Returns
/// - `200 OK` - User deleted
/// - `400 Bad Request` - Admin tried to delete their own account
/// - `404 Not Found` - No such user
#[utoipa::path(
    delete,
    path = "/api/admin/users/{user_id}",
    tag = ADMIN_TAG,
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = SuccessDto),
        (status = 400, description = "Cannot delete own account", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    AdminService::new(&state.db)
        .delete_user(&admin, user_id)
        .await?;

    Ok((StatusCode::OK, Json(SuccessDto::ok())))
}

/// Change a user's role.
///
/// # Returns
/// - `200 OK` - Role changed
/// - `400 Bad Request` - Unknown role, or an admin demoting themselves
/// - `404 Not Found` - No such user
#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}/role",
    tag = ADMIN_TAG,
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Role updated", body = SuccessDto),
        (status = 400, description = "Invalid role or self-demotion", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user_role(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(payload): Json<UpdateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let role: Role = payload.role.parse()?;
    AdminService::new(&state.db)
        .update_role(&admin, user_id, role)
        .await?;

    Ok((StatusCode::OK, Json(SuccessDto::ok())))
}

/// Get every resource in any status, with stats.
#[utoipa::path(
    get,
    path = "/api/admin/resources",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "All resources", body = Vec<ResourceSummaryDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_resources(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let resources = AdminService::new(&state.db).resources().await?;

    Ok((StatusCode::OK, Json(summaries_to_dto(resources))))
}

#[utoipa::path(
    post,
    path = "/api/admin/resources/{resource_id}/archive",
    tag = ADMIN_TAG,
    params(
        ("resource_id" = i32, Path, description = "Resource ID")
    ),
    responses(
        (status = 200, description = "Resource archived", body = ResourceDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 404, description = "Resource not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn archive_resource(
    State(state): State<AppState>,
    session: Session,
    Path(resource_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    set_status(state, session, resource_id, ResourceStatus::Archived).await
}

#[utoipa::path(
    post,
    path = "/api/admin/resources/{resource_id}/publish",
    tag = ADMIN_TAG,
    params(
        ("resource_id" = i32, Path, description = "Resource ID")
    ),
    responses(
        (status = 200, description = "Resource published", body = ResourceDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 404, description = "Resource not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn publish_resource(
    State(state): State<AppState>,
    session: Session,
    Path(resource_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    set_status(state, session, resource_id, ResourceStatus::Published).await
}

async fn set_status(
    state: AppState,
    session: Session,
    resource_id: i32,
    status: ResourceStatus,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let resource = AdminService::new(&state.db)
        .set_resource_status(resource_id, status)
        .await?;
    tracing::info!("Admin {} set resource {} to {}", admin.id, resource_id, status);

    Ok((StatusCode::OK, Json(resource.into_dto())))
}
