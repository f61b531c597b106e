//! Text extraction boundary.
//!
//! Document parsing (PDF and friends) is an external collaborator; the
//! pipeline only depends on this trait. The built-in implementation
//! handles plain UTF-8 payloads.

use async_trait::async_trait;

use crate::error::{PipelineError, Result};

/// Turns raw document bytes into extracted text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Get the name of this extractor.
    fn name(&self) -> &str;

    /// Extract text from the raw document bytes.
    async fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Extractor for documents that are already plain UTF-8 text.
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    /// Create a new plain-text extractor.
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    fn name(&self) -> &str {
        "plain-text"
    }

    async fn extract(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| PipelineError::Extraction(format!("input is not valid UTF-8: {e}")))
    }
}
