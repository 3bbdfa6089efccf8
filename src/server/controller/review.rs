use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, SuccessDto},
        review::{ReviewDto, ReviewInputDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            review::{Review, ReviewContent, ReviewWithAuthor},
            user::User,
        },
        service::review::ReviewService,
        state::AppState,
    },
};

/// Tag for grouping review endpoints in OpenAPI documentation
pub static REVIEW_TAG: &str = "review";

/// Review a resource the caller has used.
///
/// Requires a completed booking of the resource, or an approved one that has ended.
/// One review per user and resource.
///
/// # Returns
/// - `201 Created` - The review
/// - `400 Bad Request` - Rating outside 1 to 5 or empty comment
/// - `403 Forbidden` - No finished booking of the resource
/// - `404 Not Found` - Resource does not exist
/// - `409 Conflict` - Already reviewed
#[utoipa::path(
    post,
    path = "/api/resources/{resource_id}/reviews",
    tag = REVIEW_TAG,
    params(
        ("resource_id" = i32, Path, description = "Resource ID")
    ),
    request_body = ReviewInputDto,
    responses(
        (status = 201, description = "Review created", body = ReviewDto),
        (status = 400, description = "Invalid rating or comment", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not eligible to review", body = ErrorDto),
        (status = 404, description = "Resource not found", body = ErrorDto),
        (status = 409, description = "Already reviewed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_review(
    State(state): State<AppState>,
    session: Session,
    Path(resource_id): Path<i32>,
    Json(payload): Json<ReviewInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let content = ReviewContent::try_from(payload)?;
    let review = ReviewService::new(&state.db)
        .create(&user, resource_id, content)
        .await?;

    Ok((StatusCode::CREATED, Json(authored(review, user))))
}

/// Edit one of the caller's reviews.
#[utoipa::path(
    put,
    path = "/api/reviews/{review_id}",
    tag = REVIEW_TAG,
    params(
        ("review_id" = i32, Path, description = "Review ID")
    ),
    request_body = ReviewInputDto,
    responses(
        (status = 200, description = "Review updated", body = ReviewDto),
        (status = 400, description = "Invalid rating or comment", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the author", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_review(
    State(state): State<AppState>,
    session: Session,
    Path(review_id): Path<i32>,
    Json(payload): Json<ReviewInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let content = ReviewContent::try_from(payload)?;
    let review = ReviewService::new(&state.db)
        .update(review_id, &user, content)
        .await?;

    Ok((StatusCode::OK, Json(authored(review, user))))
}

/// Delete a review. Authors delete their own; admins delete any.
#[utoipa::path(
    delete,
    path = "/api/reviews/{review_id}",
    tag = REVIEW_TAG,
    params(
        ("review_id" = i32, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review deleted", body = SuccessDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the author or an admin", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_review(
    State(state): State<AppState>,
    session: Session,
    Path(review_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    ReviewService::new(&state.db).delete(review_id, &user).await?;

    Ok((StatusCode::OK, Json(SuccessDto::ok())))
}

/// Get every review for moderation, newest first.
///
/// # Access Control
/// - `Admin` - Only admins
#[utoipa::path(
    get,
    path = "/api/admin/reviews",
    tag = REVIEW_TAG,
    responses(
        (status = 200, description = "All reviews", body = Vec<ReviewDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let reviews = ReviewService::new(&state.db).list_all().await?;
    let dto: Vec<ReviewDto> = reviews
        .into_iter()
        .map(ReviewWithAuthor::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(dto)))
}

fn authored(review: Review, author: User) -> ReviewDto {
    ReviewWithAuthor {
        review,
        author_name: author.name,
    }
    .into_dto()
}
