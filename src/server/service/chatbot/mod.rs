//! Natural-language questions about the booking data, answered by generating SQL.
//!
//! The model writes a query from a schema description, [`executor`] runs it read-only,
//! and the model then summarises the rows.

pub mod client;
pub mod executor;

use sea_orm::{DatabaseConnection, JsonValue};

use crate::{
    model::chatbot::ChatbotAnswerDto,
    server::error::{chatbot::ChatbotError, AppError},
};

use self::client::ModelClient;

const SCHEMA: &str = "\
SQLite database of a campus resource booking site.

Table user: id INTEGER PK, email TEXT UNIQUE, name TEXT, role TEXT ('student', 'staff', 'admin'), \
department TEXT NULL, profile_image TEXT NULL, created_at DATETIME
Table resource: id INTEGER PK, owner_id INTEGER FK user.id, title TEXT, description TEXT, \
category TEXT ('study-room', 'lab-equipment', 'event-space', 'av-equipment', 'tutoring', 'other'), \
location TEXT, capacity INTEGER, availability_rules TEXT NULL, requires_approval BOOLEAN, \
status TEXT ('draft', 'published', 'archived'), created_at DATETIME, updated_at DATETIME
Table resource_image: id INTEGER PK, resource_id INTEGER FK resource.id, image_url TEXT
Table resource_equipment: id INTEGER PK, resource_id INTEGER FK resource.id, equipment_name TEXT
Table booking: id INTEGER PK, resource_id INTEGER FK resource.id, user_id INTEGER FK user.id, \
start_datetime DATETIME, end_datetime DATETIME, \
status TEXT ('pending', 'approved', 'rejected', 'completed', 'cancelled'), notes TEXT NULL, \
recurrence TEXT ('none', 'daily', 'weekly'), created_at DATETIME, updated_at DATETIME
Table review: id INTEGER PK, resource_id INTEGER FK resource.id, user_id INTEGER FK user.id, \
rating INTEGER (1-5), comment TEXT, created_at DATETIME, UNIQUE (resource_id, user_id)
Table message: id INTEGER PK, thread_id TEXT, sender_id INTEGER FK user.id, \
receiver_id INTEGER FK user.id, content TEXT, read BOOLEAN, created_at DATETIME
Table notification: id INTEGER PK, user_id INTEGER FK user.id, kind TEXT, title TEXT, \
message TEXT, read BOOLEAN, link TEXT NULL, created_at DATETIME";

/// Result of answering one question.
#[derive(Debug, Clone)]
pub struct ChatbotAnswer {
    pub sql: String,
    pub rows: Vec<JsonValue>,
    pub answer: String,
}

impl ChatbotAnswer {
    pub fn into_dto(self) -> ChatbotAnswerDto {
        ChatbotAnswerDto {
            sql: self.sql,
            row_count: self.rows.len(),
            rows: self.rows,
            answer: self.answer,
        }
    }
}

pub struct ChatbotService<'a> {
    db: &'a DatabaseConnection,
    client: Option<&'a ModelClient>,
}

impl<'a> ChatbotService<'a> {
    pub fn new(db: &'a DatabaseConnection, client: Option<&'a ModelClient>) -> Self {
        Self { db, client }
    }

    /// Answers a question by generating, checking and running a query, then summarising it.
    ///
    /// # Returns
    /// - `Ok(ChatbotAnswer)` - Query, rows and summary
    /// - `Err(AppError::BadRequest)` - Empty question
    /// - `Err(ChatbotError::NotConfigured)` - No API key configured
    /// - `Err(ChatbotError::UnsafeQuery)` - Generated query failed the read-only checks
    /// - `Err(ChatbotError::QueryFailed)` - Database rejected the query
    pub async fn ask(&self, question: &str) -> Result<ChatbotAnswer, AppError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::BadRequest("Please enter a question.".to_string()));
        }
        let client = self.client.ok_or(ChatbotError::NotConfigured)?;

        let reply = client.generate(&sql_prompt(question)).await?;
        let sql = extract_sql(&reply);
        tracing::info!("Chatbot generated query: {}", sql);

        let rows = executor::execute(self.db, &sql).await?;
        let answer = client
            .generate(&summary_prompt(question, &sql, &rows))
            .await?;

        Ok(ChatbotAnswer { sql, rows, answer })
    }
}

fn sql_prompt(question: &str) -> String {
    format!(
        "{SCHEMA}\n\nUser question: {question}\n\n\
         Write one SQLite SELECT query that answers this question. \
         Return only the SQL query, nothing else."
    )
}

fn summary_prompt(question: &str, sql: &str, rows: &[JsonValue]) -> String {
    let data = serde_json::to_string(rows).unwrap_or_default();
    format!(
        "User asked: {question}\n\nI ran this SQL query:\n{sql}\n\n\
         Results ({} rows):\n{data}\n\n\
         Give a clear, plain-language answer to the question based on these results.",
        rows.len()
    )
}

/// Pulls the query out of a model reply, dropping a surrounding fenced code block.
fn extract_sql(reply: &str) -> String {
    let fenced = reply
        .split_once("```sql")
        .or_else(|| reply.split_once("```"))
        .map(|(_, rest)| rest.split("```").next().unwrap_or(rest));

    fenced.unwrap_or(reply).trim().to_string()
}
