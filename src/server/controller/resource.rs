use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, SuccessDto},
        resource::{
            BrowseQueryDto, ResourceDetailDto, ResourceDto, ResourceInputDto, ResourceSummaryDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::resource::{ResourceFields, ResourceQuery, ResourceSummary},
        service::resource::ResourceService,
        state::AppState,
    },
};

/// Tag for grouping resource endpoints in OpenAPI documentation
pub static RESOURCE_TAG: &str = "resource";

/// Browse the resource catalogue.
///
/// Anonymous callers see published resources. `scope=mine` lists the caller's own
/// resources in every status, and admins may filter by `status`.
///
/// # Returns
/// - `200 OK` - Matching resources with rating and booking stats
/// - `400 Bad Request` - Unknown category, sort or status
/// - `401 Unauthorized` - `scope=mine` without a session
#[utoipa::path(
    get,
    path = "/api/resources",
    tag = RESOURCE_TAG,
    params(BrowseQueryDto),
    responses(
        (status = 200, description = "Matching resources", body = Vec<ResourceSummaryDto>),
        (status = 400, description = "Invalid filter value", body = ErrorDto),
        (status = 401, description = "Own resources requested without a session", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn browse_resources(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<BrowseQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &session).optional().await?;
    let query = ResourceQuery::try_from(params)?;

    let resources = ResourceService::new(&state.db)
        .browse(viewer.as_ref(), query)
        .await?;

    Ok((StatusCode::OK, Json(summaries_to_dto(resources))))
}

/// Get the caller's own resources in every status.
///
/// # Access Control
/// - `Staff` - Staff and admins own resources
#[utoipa::path(
    get,
    path = "/api/resources/mine",
    tag = RESOURCE_TAG,
    responses(
        (status = 200, description = "Caller's resources", body = Vec<ResourceSummaryDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Staff role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn my_resources(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let resources = ResourceService::new(&state.db)
        .my_resources(user.id)
        .await?;

    Ok((StatusCode::OK, Json(summaries_to_dto(resources))))
}

/// Get a resource's page.
///
/// Drafts and archived resources are only visible to their owner and admins.
///
/// # Returns
/// - `200 OK` - Resource with owner, images, equipment, reviews and stats
/// - `404 Not Found` - Missing or not visible to the caller
#[utoipa::path(
    get,
    path = "/api/resources/{resource_id}",
    tag = RESOURCE_TAG,
    params(
        ("resource_id" = i32, Path, description = "Resource ID")
    ),
    responses(
        (status = 200, description = "Resource detail", body = ResourceDetailDto),
        (status = 404, description = "Resource not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_resource(
    State(state): State<AppState>,
    session: Session,
    Path(resource_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &session).optional().await?;

    let detail = ResourceService::new(&state.db)
        .detail(resource_id, viewer.as_ref())
        .await?;

    Ok((StatusCode::OK, Json(detail.into_dto())))
}

/// Create a resource owned by the caller.
///
/// # Access Control
/// - `Staff` - Staff and admins list resources
///
/// # Returns
/// - `201 Created` - Created resource
/// - `400 Bad Request` - Missing fields, capacity below 1, or unknown category/status
#[utoipa::path(
    post,
    path = "/api/resources",
    tag = RESOURCE_TAG,
    request_body = ResourceInputDto,
    responses(
        (status = 201, description = "Resource created", body = ResourceDto),
        (status = 400, description = "Invalid resource data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Staff role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_resource(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ResourceInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let fields = ResourceFields::try_from(payload)?;
    let resource = ResourceService::new(&state.db)
        .create(user.id, fields)
        .await?;

    Ok((StatusCode::CREATED, Json(resource.into_dto())))
}

/// Replace a resource's fields, images and equipment.
///
/// # Access Control
/// - `ManageResource` - Owner or admin
#[utoipa::path(
    put,
    path = "/api/resources/{resource_id}",
    tag = RESOURCE_TAG,
    params(
        ("resource_id" = i32, Path, description = "Resource ID")
    ),
    request_body = ResourceInputDto,
    responses(
        (status = 200, description = "Resource updated", body = ResourceDto),
        (status = 400, description = "Invalid resource data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Resource not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_resource(
    State(state): State<AppState>,
    session: Session,
    Path(resource_id): Path<i32>,
    Json(payload): Json<ResourceInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageResource(resource_id)])
        .await?;

    let fields = ResourceFields::try_from(payload)?;
    let resource = ResourceService::new(&state.db)
        .update(resource_id, fields)
        .await?;

    Ok((StatusCode::OK, Json(resource.into_dto())))
}

/// Delete a resource with its bookings and reviews.
///
/// # Access Control
/// - `ManageResource` - Owner or admin
#[utoipa::path(
    delete,
    path = "/api/resources/{resource_id}",
    tag = RESOURCE_TAG,
    params(
        ("resource_id" = i32, Path, description = "Resource ID")
    ),
    responses(
        (status = 200, description = "Resource deleted", body = SuccessDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Resource not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_resource(
    State(state): State<AppState>,
    session: Session,
    Path(resource_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageResource(resource_id)])
        .await?;

    ResourceService::new(&state.db).delete(resource_id).await?;

    Ok((StatusCode::OK, Json(SuccessDto::ok())))
}

pub(super) fn summaries_to_dto(resources: Vec<ResourceSummary>) -> Vec<ResourceSummaryDto> {
    resources.into_iter().map(ResourceSummary::into_dto).collect()
}
