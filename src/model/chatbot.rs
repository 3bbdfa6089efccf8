use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ChatbotQuestionDto {
    pub question: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ChatbotAnswerDto {
    pub sql: String,
    pub row_count: usize,
    #[schema(value_type = Vec<Object>)]
    pub rows: Vec<serde_json::Value>,
    pub answer: String,
}
