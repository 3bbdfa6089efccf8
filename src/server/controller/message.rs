use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        message::{MessageDto, SendMessageDto, StartThreadDto, ThreadDto, ThreadSummaryDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::message::{ThreadId, ThreadSummary},
        service::message::MessageService,
        state::AppState,
    },
};

/// Tag for grouping messaging endpoints in OpenAPI documentation
pub static MESSAGE_TAG: &str = "message";

/// Get the caller's conversations, most recent activity first.
#[utoipa::path(
    get,
    path = "/api/messages",
    tag = MESSAGE_TAG,
    responses(
        (status = 200, description = "Caller's threads", body = Vec<ThreadSummaryDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_threads(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let threads = MessageService::new(&state.db).threads(user.id).await?;
    let dto: Vec<ThreadSummaryDto> = threads
        .into_iter()
        .map(ThreadSummary::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Get a conversation and mark the caller's incoming messages read.
///
/// # Returns
/// - `200 OK` - Messages oldest first with the other participant
/// - `400 Bad Request` - Malformed thread id
/// - `403 Forbidden` - Caller is not a participant
/// - `404 Not Found` - Thread refers to a missing resource, booking or user
#[utoipa::path(
    get,
    path = "/api/messages/{thread_id}",
    tag = MESSAGE_TAG,
    params(
        ("thread_id" = String, Path, description = "`resource-{resource_id}-{requester_id}` or `booking-{booking_id}`")
    ),
    responses(
        (status = 200, description = "Thread messages", body = ThreadDto),
        (status = 400, description = "Malformed thread id", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not a participant", body = ErrorDto),
        (status = 404, description = "Thread not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_thread(
    State(state): State<AppState>,
    session: Session,
    Path(thread_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    let thread_id: ThreadId = thread_id.parse()?;

    let view = MessageService::new(&state.db)
        .view(thread_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(view.into_dto())))
}

/// Get the thread id for asking a resource's owner about it.
#[utoipa::path(
    post,
    path = "/api/resources/{resource_id}/messages",
    tag = MESSAGE_TAG,
    params(
        ("resource_id" = i32, Path, description = "Resource ID")
    ),
    responses(
        (status = 200, description = "Thread to use", body = StartThreadDto),
        (status = 400, description = "Caller owns the resource", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Resource not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn start_thread(
    State(state): State<AppState>,
    session: Session,
    Path(resource_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let thread_id = MessageService::new(&state.db)
        .start(resource_id, user.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(StartThreadDto {
            thread_id: thread_id.to_string(),
        }),
    ))
}

/// Send a message to the other participant of a thread.
#[utoipa::path(
    post,
    path = "/api/messages/{thread_id}",
    tag = MESSAGE_TAG,
    params(
        ("thread_id" = String, Path, description = "`resource-{resource_id}-{requester_id}` or `booking-{booking_id}`")
    ),
    request_body = SendMessageDto,
    responses(
        (status = 201, description = "Message sent", body = MessageDto),
        (status = 400, description = "Empty message or malformed thread id", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not a participant", body = ErrorDto),
        (status = 404, description = "Thread not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_message(
    State(state): State<AppState>,
    session: Session,
    Path(thread_id): Path<String>,
    Json(payload): Json<SendMessageDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    let thread_id: ThreadId = thread_id.parse()?;

    let message = MessageService::new(&state.db)
        .send(thread_id, &user, payload.content)
        .await?;

    Ok((StatusCode::CREATED, Json(message.into_dto())))
}
