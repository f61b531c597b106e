//! Embedding providers.
//!
//! A provider turns text into a fixed-length vector. The same text embeds
//! differently depending on whether it is indexed document content or a
//! search query, so every request carries an [`InputMode`].

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Embedding;
use crate::error::{EmbeddingError, Result};

/// Default per-request timeout for provider calls.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How the embedded text will be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Text being indexed for later retrieval.
    Document,
    /// A search query being matched against indexed documents.
    Query,
}

impl InputMode {
    /// The Cohere `input_type` wire value for this mode.
    pub fn as_input_type(self) -> &'static str {
        match self {
            InputMode::Document => "search_document",
            InputMode::Query => "search_query",
        }
    }
}

/// Request for generating an embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// Text to embed.
    pub text: String,

    /// How the text will be used.
    pub mode: InputMode,

    /// Model to use (provider-specific).
    pub model: Option<String>,
}

impl EmbeddingRequest {
    /// Create a new embedding request.
    pub fn new(text: impl Into<String>, mode: InputMode) -> Self {
        Self {
            text: text.into(),
            mode,
            model: None,
        }
    }

    /// Set the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Response from embedding generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// The generated embedding.
    pub embedding: Embedding,

    /// Model used to generate the embedding.
    pub model: String,

    /// Dimension of the embedding.
    pub dimension: usize,
}

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Get the default model for this provider.
    fn default_model(&self) -> &str;

    /// Get the default embedding dimension.
    fn default_dimension(&self) -> usize;

    /// Generate an embedding for the given request.
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse>;

    /// Check if the provider is available (API key set, etc.).
    fn is_available(&self) -> bool;
}

/// Cohere embedding provider.
pub struct CohereProvider {
    /// API key.
    api_key: Option<String>,

    /// API base URL.
    base_url: String,

    /// HTTP client.
    client: reqwest::Client,

    /// Default model.
    default_model: String,

    /// Per-request timeout.
    request_timeout: Duration,
}

impl CohereProvider {
    /// Create a new Cohere provider.
    pub fn new() -> Self {
        Self {
            api_key: std::env::var("COHERE_API_KEY").ok(),
            base_url: "https://api.cohere.com/v1".to_string(),
            client: reqwest::Client::new(),
            default_model: "embed-english-v3.0".to_string(),
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

    /// Set the default model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for CohereProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for CohereProvider {
    fn name(&self) -> &str {
        "cohere"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn default_dimension(&self) -> usize {
        match self.default_model.as_str() {
            "embed-english-v3.0" => 1024,
            "embed-english-light-v3.0" => 384,
            "embed-multilingual-v3.0" => 1024,
            _ => 1024,
        }
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(EmbeddingError::ProviderNotConfigured)?;

        let model = request.model.unwrap_or_else(|| self.default_model.clone());

        debug!(
            "Generating {} embedding with model: {model}",
            request.mode.as_input_type()
        );

        let body = serde_json::json!({
            "texts": [request.text],
            "model": model,
            "input_type": request.mode.as_input_type(),
        });

        let response = self
            .client
            .post(format!("{}/embed", self.base_url))
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .timeout(self.request_timeout)
            .json(&body)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);

            return Err(EmbeddingError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ApiRequest(format!(
                "API error: {error_text}"
            )));
        }

        let result: CohereEmbedResponse = response.json().await?;

        let embedding = result
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::InvalidResponse("No embedding in response".to_string()))?;

        let dimension = embedding.len();

        debug!("Generated embedding with {dimension} dimensions");

        Ok(EmbeddingResponse {
            embedding,
            model,
            dimension,
        })
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Cohere API response format.
#[derive(Debug, Deserialize)]
struct CohereEmbedResponse {
    embeddings: Vec<Embedding>,
}
