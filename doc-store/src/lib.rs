//! # Document store
//!
//! Content-addressed storage for embedded document indexes.
//!
//! A document is identified by the SHA-256 digest of its raw bytes, so
//! identical uploads always resolve to the same [`DocumentId`] and an
//! already-indexed document never needs re-embedding. Each index is a
//! single JSON file under the store root, written atomically so a failed
//! write never becomes visible as a readable index.

pub mod document;
pub mod error;
pub mod store;

pub use document::{Chunk, DocumentId, DocumentIndex, EmbeddedChunk};
pub use error::{Result, StoreError};
pub use store::DocumentStore;
