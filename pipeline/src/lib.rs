//! # Document QA Pipeline
//!
//! This crate wires chunking, embedding, caching, and retrieval into the
//! two user-facing operations of the docqa system:
//!
//! - **ingest**: hash the raw bytes, short-circuit on a cache hit, else
//!   extract text, chunk it, embed every chunk, and persist the index
//! - **answer**: load the cached index, embed the question, rank chunks
//!   by cosine similarity, and forward the top-k as generation context
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     DocumentPipeline                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  ingest(bytes)                answer(question, id)          │
//! │      │                              │                       │
//! │      ▼                              ▼                       │
//! │  DocumentId ── exists? ──►     DocumentStore.load           │
//! │      │ miss                         │                       │
//! │      ▼                              ▼                       │
//! │  TextExtractor ─► Chunker     EmbeddingProvider (query)     │
//! │      │                              │                       │
//! │      ▼                              ▼                       │
//! │  EmbeddingProvider (doc)      Retriever.top_k ─► context    │
//! │      │                              │                       │
//! │      ▼                              ▼                       │
//! │  DocumentStore.store          AnswerGenerator               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use docqa_embeddings::CohereProvider;
//! use docqa_pipeline::{DocumentPipeline, GroqGenerator, PipelineConfig, PlainTextExtractor};
//!
//! let pipeline = DocumentPipeline::new(
//!     PipelineConfig::new("./vectorstore"),
//!     Arc::new(CohereProvider::new()),
//!     Arc::new(PlainTextExtractor::new()),
//!     Arc::new(GroqGenerator::new()),
//! )
//! .await?;
//!
//! let id = pipeline.ingest(&bytes).await?;
//! let answer = pipeline.answer("What is this about?", &id).await?;
//! ```

pub mod chunker;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod generate;
pub mod retriever;

pub use chunker::ParagraphChunker;
pub use config::{ChunkingConfig, PipelineConfig, RetrievalConfig};
pub use engine::DocumentPipeline;
pub use error::{PipelineError, Result};
pub use extract::{PlainTextExtractor, TextExtractor};
pub use generate::{Answer, AnswerGenerator, GroqGenerator};
pub use retriever::{ScoredChunk, build_context, top_k};

// Re-export from dependencies for convenience
pub use docqa_doc_store::{Chunk, DocumentId, DocumentIndex, DocumentStore, EmbeddedChunk};
pub use docqa_embeddings::{EmbeddingProvider, InputMode};
