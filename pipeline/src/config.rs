//! Configuration for the answering pipeline.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default target chunk size in characters.
pub const DEFAULT_CHUNK_CHARS: usize = 500;

/// Default number of chunks retrieved as generation context.
pub const DEFAULT_TOP_K: usize = 2;

/// Configuration for the answering pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory holding the per-document index files.
    pub store_dir: PathBuf,

    /// Chunking configuration.
    pub chunking: ChunkingConfig,

    /// Retrieval configuration.
    pub retrieval: RetrievalConfig,
}

impl PipelineConfig {
    /// Create a new configuration with default values.
    pub fn new(store_dir: impl Into<PathBuf>) -> Self {
        Self {
            store_dir: store_dir.into(),
            chunking: ChunkingConfig::default(),
            retrieval: RetrievalConfig::default(),
        }
    }

    /// Set the chunking configuration.
    pub fn with_chunking(mut self, config: ChunkingConfig) -> Self {
        self.chunking = config;
        self
    }

    /// Set the retrieval configuration.
    pub fn with_retrieval(mut self, config: RetrievalConfig) -> Self {
        self.retrieval = config;
        self
    }
}

/// Configuration for document chunking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target maximum chunk size in characters.
    ///
    /// A single paragraph longer than this still becomes one chunk.
    pub max_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_CHUNK_CHARS,
        }
    }
}

/// Configuration for answer-time retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of top-scoring chunks forwarded as generation context.
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}
