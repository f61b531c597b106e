//! Error types for the document store.

use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in the document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No index exists for the requested document.
    #[error("document not indexed: {id}")]
    NotFound { id: String },

    /// An index already exists for this document.
    #[error("document already indexed: {id}")]
    AlreadyIndexed { id: String },

    /// A string failed to parse as a document id.
    #[error("invalid document id: {0}")]
    InvalidId(String),

    /// Failed to create the store directory.
    #[error("failed to create store directory: {0}")]
    CreateDirectory(String),

    /// Failed to read an index file.
    #[error("failed to read index: {0}")]
    ReadFile(String),

    /// Failed to write an index file.
    #[error("failed to write index: {0}")]
    WriteFile(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
