//! # Embeddings
//!
//! This crate provides semantic embedding generation and similarity
//! scoring for the docqa retrieval pipeline.
//!
//! ## Features
//!
//! - **Embedding Generation**: Convert text to dense vectors via a remote model
//! - **Input Modes**: Separate document and query embedding modes
//! - **Similarity Scoring**: Cosine similarity between query and chunk vectors
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     Embeddings System                      │
//! ├────────────────────────────────────────────────────────────┤
//! │  EmbeddingProvider ──► Embedding ──► cosine_similarity     │
//! │       │                                                    │
//! │       ▼                                                    │
//! │  Cohere (HTTP)                                             │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod provider;
pub mod similarity;

pub use error::{EmbeddingError, Result};
pub use provider::{
    CohereProvider, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, InputMode,
};
pub use similarity::cosine_similarity;

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Dimension of embeddings (varies by model).
pub const DEFAULT_DIMENSION: usize = 1024; // Cohere embed-english-v3.0
