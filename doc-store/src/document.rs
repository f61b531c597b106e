//! Document identity and the embedded-chunk data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::{Result, StoreError};

/// Number of lowercase-hex characters in a document id.
const DIGEST_HEX_LEN: usize = 64;

/// Content-addressed identifier for a document.
///
/// Derived deterministically from the raw document bytes, so the same
/// upload always maps to the same id. Serves as both the cache key and
/// the external handle returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Derive the id for a document from its raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Parse an id handed back over the API boundary.
    ///
    /// Accepts exactly the shape `from_bytes` produces: 64 lowercase hex
    /// characters.
    pub fn parse(s: &str) -> Result<Self> {
        let lowercase_hex = s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if s.len() != DIGEST_HEX_LEN || !lowercase_hex {
            return Err(StoreError::InvalidId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// The id as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A contiguous span of source text, the atomic retrieval unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// The chunk text (non-empty).
    pub text: String,

    /// Position of the chunk within the document.
    pub sequence_index: usize,
}

impl Chunk {
    /// Create a new chunk.
    pub fn new(text: impl Into<String>, sequence_index: usize) -> Self {
        Self {
            text: text.into(),
            sequence_index,
        }
    }
}

/// A chunk paired with its embedding vector — the unit persisted per document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedChunk {
    /// The source chunk.
    pub chunk: Chunk,

    /// The embedding vector for the chunk text.
    pub embedding: Vec<f32>,
}

impl EmbeddedChunk {
    /// Pair a chunk with its embedding.
    pub fn new(chunk: Chunk, embedding: Vec<f32>) -> Self {
        Self { chunk, embedding }
    }
}

/// The ordered embedded chunks of one document, plus index provenance.
///
/// Created once at first ingest and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentIndex {
    /// Embedded chunks in document order.
    pub chunks: Vec<EmbeddedChunk>,

    /// Model that produced the embeddings.
    pub embedding_model: String,

    /// When the index was created.
    pub created_at: DateTime<Utc>,
}

impl DocumentIndex {
    /// Create an index from ordered embedded chunks.
    pub fn new(chunks: Vec<EmbeddedChunk>, embedding_model: impl Into<String>) -> Self {
        Self {
            chunks,
            embedding_model: embedding_model.into(),
            created_at: Utc::now(),
        }
    }

    /// Number of embedded chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_id_is_deterministic() {
        let a = DocumentId::from_bytes(b"some document bytes");
        let b = DocumentId::from_bytes(b"some document bytes");
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_content_distinct_ids() {
        let a = DocumentId::from_bytes(b"document one");
        let b = DocumentId::from_bytes(b"document two");
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_shape() {
        let id = DocumentId::from_bytes(b"anything");
        assert_eq!(id.as_str().len(), 64);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_parse_round_trip() {
        let id = DocumentId::from_bytes(b"round trip");
        let parsed = DocumentId::parse(id.as_str()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_bad_ids() {
        assert!(DocumentId::parse("too-short").is_err());
        assert!(DocumentId::parse(&"g".repeat(64)).is_err());
        assert!(DocumentId::parse(&"A".repeat(64)).is_err());
    }

    #[test]
    fn test_index_len() {
        let index = DocumentIndex::new(
            vec![EmbeddedChunk::new(Chunk::new("text", 0), vec![1.0, 0.0])],
            "embed-english-v3.0",
        );
        assert_eq!(index.len(), 1);
        assert!(!index.is_empty());
    }

    #[test]
    fn test_index_serde_round_trip() {
        let index = DocumentIndex::new(
            vec![
                EmbeddedChunk::new(Chunk::new("first", 0), vec![0.1, 0.2]),
                EmbeddedChunk::new(Chunk::new("second", 1), vec![0.3, 0.4]),
            ],
            "embed-english-v3.0",
        );

        let json = serde_json::to_string(&index).unwrap();
        let back: DocumentIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(back, index);
    }
}
