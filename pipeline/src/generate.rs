//! Answer generation boundary.
//!
//! The generator receives the retrieved context and the user's question
//! and returns an answer with provenance (which model answered, when).
//! The built-in implementation talks to Groq's OpenAI-compatible chat
//! completions API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PipelineError, Result};

/// Default per-request timeout for generation calls.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// System prompt constraining answers to the supplied context.
const SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Answer concisely using only the given context.";

/// A generated answer with provenance metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// The answer text.
    pub text: String,

    /// Identifier of the model that produced the answer.
    pub model_id: String,

    /// When the answer was generated.
    pub created_at: DateTime<Utc>,
}

/// Trait for answer generators.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Get the name of this generator.
    fn name(&self) -> &str;

    /// Get the model used for generation.
    fn model(&self) -> &str;

    /// Generate an answer to `question` grounded in `context`.
    async fn generate(&self, context: &str, question: &str) -> Result<Answer>;

    /// Check if the generator is available (API key set, etc.).
    fn is_available(&self) -> bool;
}

/// Groq answer generator (OpenAI-compatible chat completions).
pub struct GroqGenerator {
    /// API key.
    api_key: Option<String>,

    /// API base URL.
    base_url: String,

    /// HTTP client.
    client: reqwest::Client,

    /// Model to use.
    model: String,

    /// Per-request timeout.
    request_timeout: Duration,
}

impl GroqGenerator {
    /// Create a new Groq generator.
    pub fn new() -> Self {
        Self {
            api_key: std::env::var("GROQ_API_KEY").ok(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            client: reqwest::Client::new(),
            model: "llama3-8b-8192".to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for GroqGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerGenerator for GroqGenerator {
    fn name(&self) -> &str {
        "groq"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, context: &str, question: &str) -> Result<Answer> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            PipelineError::Generation("generator not configured: missing API key".to_string())
        })?;

        debug!("Generating answer with model: {}", self.model);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": format!("Context:\n\n{context}\n\nQuestion: {question}") },
            ],
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .timeout(self.request_timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::Generation(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PipelineError::Generation(format!(
                "API error: {error_text}"
            )));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Generation(format!("invalid response: {e}")))?;

        let text = result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                PipelineError::Generation("no choices in completion response".to_string())
            })?;

        let created_at = DateTime::from_timestamp(result.created, 0).unwrap_or_else(Utc::now);

        debug!("Generated answer ({} chars)", text.len());

        Ok(Answer {
            text,
            model_id: result.model,
            created_at,
        })
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}

/// OpenAI-compatible chat completion response format.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    model: String,
    created: i64,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_generate_parses_answer_and_provenance() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama3-8b-8192",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "It is about chunking." } }
                ],
                "model": "llama3-8b-8192",
                "created": 1_700_000_000,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let generator = GroqGenerator::new()
            .with_api_key("test-key")
            .with_base_url(server.uri());

        let answer = generator
            .generate("Some context.", "What is this about?")
            .await
            .unwrap();

        assert_eq!(answer.text, "It is about chunking.");
        assert_eq!(answer.model_id, "llama3-8b-8192");
        assert_eq!(answer.created_at.timestamp(), 1_700_000_000);
    }

    #[tokio::test]
    async fn test_generate_maps_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model overloaded"))
            .mount(&server)
            .await;

        let generator = GroqGenerator::new()
            .with_api_key("test-key")
            .with_base_url(server.uri());

        let err = generator.generate("ctx", "q").await.unwrap_err();
        assert!(matches!(err, PipelineError::Generation(msg) if msg.contains("model overloaded")));
    }

    #[tokio::test]
    async fn test_generate_without_key_fails_before_request() {
        let mut generator = GroqGenerator::new();
        generator.api_key = None;

        assert!(!generator.is_available());

        let err = generator.generate("ctx", "q").await.unwrap_err();
        assert!(matches!(err, PipelineError::Generation(_)));
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_choices() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [],
                "model": "llama3-8b-8192",
                "created": 1_700_000_000,
            })))
            .mount(&server)
            .await;

        let generator = GroqGenerator::new()
            .with_api_key("test-key")
            .with_base_url(server.uri());

        let err = generator.generate("ctx", "q").await.unwrap_err();
        assert!(matches!(err, PipelineError::Generation(msg) if msg.contains("no choices")));
    }
}
