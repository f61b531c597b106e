//! Error types for the answering pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur in the answering pipeline.
///
/// External-collaborator failures propagate to the caller unmodified;
/// the pipeline performs no retries and never substitutes a fallback
/// answer.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The external extractor could not parse the input.
    #[error("text extraction failed: {0}")]
    Extraction(String),

    /// An embedding call failed (includes dimension mismatches).
    #[error("embedding error: {0}")]
    Embedding(#[from] docqa_embeddings::EmbeddingError),

    /// The answer generator failed.
    #[error("answer generation failed: {0}")]
    Generation(String),

    /// Document store error (includes not-found and already-indexed).
    #[error("store error: {0}")]
    Store(#[from] docqa_doc_store::StoreError),

    /// A caller-supplied argument was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
