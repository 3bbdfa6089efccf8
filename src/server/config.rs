use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_GEMINI_MODELS: &str = "gemini-2.5-flash,gemini-2.0-flash,gemini-1.5-flash";

pub struct Config {
    pub database_url: String,
    pub bind_address: String,

    /// Chatbot is disabled when unset.
    pub gemini_api_key: Option<String>,
    /// Candidate models, tried in order.
    pub gemini_models: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            gemini_models: parse_models(
                &std::env::var("GEMINI_MODELS")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_MODELS.to_string()),
            ),
        })
    }
}

fn parse_models(raw: &str) -> Vec<String> {
    let models: Vec<String> = raw
        .split(',')
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .collect();

    if models.is_empty() {
        parse_models(DEFAULT_GEMINI_MODELS)
    } else {
        models
    }
}
