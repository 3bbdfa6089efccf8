//! Client for the Gemini `generateContent` API with model fallback.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::{future::Future, time::Duration};

use crate::server::error::chatbot::ChatbotError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Retry schedule for rate-limited models.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Attempts per model, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry; doubled for each later one.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

#[derive(Clone)]
pub struct ModelClient {
    http: reqwest::Client,
    api_key: String,
    models: Vec<String>,
    base_url: String,
    retry: RetryPolicy,
}

impl ModelClient {
    pub fn new(http: reqwest::Client, api_key: String, models: Vec<String>) -> Self {
        Self {
            http,
            api_key,
            models,
            base_url: DEFAULT_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    /// Points the client at another API root, such as a local stand-in server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sends the prompt to the first candidate model able to answer it.
    pub async fn generate(&self, prompt: &str) -> Result<String, ChatbotError> {
        with_model_fallback(&self.models, self.retry, |model| {
            self.generate_with(model, prompt)
        })
        .await
    }

    async fn generate_with(&self, model: String, prompt: &str) -> Result<String, ChatbotError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateRequest::new(prompt))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(ChatbotError::ModelNotFound(model)),
            StatusCode::TOO_MANY_REQUESTS => return Err(ChatbotError::RateLimited(model)),
            status if !status.is_success() => {
                return Err(ChatbotError::Api {
                    status: status.as_u16(),
                    body: response.text().await.unwrap_or_default(),
                })
            }
            _ => {}
        }

        let body: GenerateResponse = response.json().await?;
        body.text().ok_or(ChatbotError::EmptyResponse)
    }
}

/// Calls `call` with each model in turn until one succeeds.
///
/// A missing model moves on to the next one immediately. A rate-limited model is retried
/// with exponential backoff until `policy.max_attempts` is used up, then the next model
/// is tried. Any other error is returned as is.
pub async fn with_model_fallback<T, F, Fut>(
    models: &[String],
    policy: RetryPolicy,
    mut call: F,
) -> Result<T, ChatbotError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T, ChatbotError>>,
{
    for model in models {
        let mut delay = policy.base_delay;

        for attempt in 1..=policy.max_attempts {
            match call(model.clone()).await {
                Ok(value) => return Ok(value),
                Err(ChatbotError::ModelNotFound(_)) => {
                    tracing::warn!("Model {} not found, trying next candidate", model);
                    break;
                }
                Err(ChatbotError::RateLimited(_)) if attempt < policy.max_attempts => {
                    tracing::warn!(
                        "Model {} rate limited (attempt {}), retrying in {:?}",
                        model,
                        attempt,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(ChatbotError::RateLimited(_)) => {
                    tracing::warn!("Model {} still rate limited, trying next candidate", model);
                }
                Err(err) => return Err(err),
            }
        }
    }

    Err(ChatbotError::NoModelAvailable)
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

impl<'a> GenerateRequest<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            contents: [Content {
                parts: [Part { text }],
            }],
        }
    }
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();

        (!text.trim().is_empty()).then_some(text)
    }
}
