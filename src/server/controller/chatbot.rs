use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        chatbot::{ChatbotAnswerDto, ChatbotQuestionDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::chatbot::ChatbotService,
        state::AppState,
    },
};

/// Tag for grouping chatbot endpoints in OpenAPI documentation
pub static CHATBOT_TAG: &str = "chatbot";

/// Answer a question about the booking data.
///
/// The language model writes a read-only SQL query from the question, the query runs in a
/// transaction that is rolled back, and the model summarises the rows.
///
/// # Access Control
/// - `Admin` - Only admins
///
/// # Returns
/// - `200 OK` - Generated SQL, rows and summary
/// - `400 Bad Request` - Empty question, or the generated query was unsafe or failed
/// - `502 Bad Gateway` - Model API unreachable or no model available
/// - `503 Service Unavailable` - No API key configured
#[utoipa::path(
    post,
    path = "/api/admin/chatbot",
    tag = CHATBOT_TAG,
    request_body = ChatbotQuestionDto,
    responses(
        (status = 200, description = "Answer", body = ChatbotAnswerDto),
        (status = 400, description = "Empty question or rejected query", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 502, description = "Model API failure", body = ErrorDto),
        (status = 503, description = "Chatbot not configured", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn ask(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ChatbotQuestionDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let answer = ChatbotService::new(&state.db, state.chatbot.as_ref())
        .ask(&payload.question)
        .await?;

    Ok((StatusCode::OK, Json(answer.into_dto())))
}
