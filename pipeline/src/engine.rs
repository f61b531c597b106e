//! Pipeline orchestration.
//!
//! Per document the pipeline is a two-state machine: unindexed, then
//! indexed. Ingest moves a document to indexed exactly once; answering
//! only reads. There is no deletion and no re-indexing.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::try_join_all;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use docqa_doc_store::{DocumentId, DocumentIndex, DocumentStore, EmbeddedChunk, StoreError};
use docqa_embeddings::{EmbeddingError, EmbeddingProvider, EmbeddingRequest, InputMode};

use crate::chunker::ParagraphChunker;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::extract::TextExtractor;
use crate::generate::{Answer, AnswerGenerator};
use crate::retriever::{build_context, top_k};

/// The docqa orchestrator.
///
/// Wires the chunker, the embedding provider, the document store, and
/// the answer generator into the two user-facing operations. All
/// collaborators are injected, so tests substitute doubles and no
/// process-wide client singletons exist.
pub struct DocumentPipeline {
    /// Configuration.
    config: PipelineConfig,

    /// Content-addressed index storage.
    store: DocumentStore,

    /// Paragraph chunker.
    chunker: ParagraphChunker,

    /// Embedding provider.
    embedder: Arc<dyn EmbeddingProvider>,

    /// Text extractor.
    extractor: Arc<dyn TextExtractor>,

    /// Answer generator.
    generator: Arc<dyn AnswerGenerator>,

    /// At most one writer per document id, so concurrent ingests of the
    /// same bytes embed once instead of racing the store.
    ingest_locks: Mutex<HashMap<DocumentId, Arc<Mutex<()>>>>,
}

impl DocumentPipeline {
    /// Initialize the pipeline with the given configuration and
    /// collaborators.
    pub async fn new(
        config: PipelineConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        extractor: Arc<dyn TextExtractor>,
        generator: Arc<dyn AnswerGenerator>,
    ) -> Result<Self> {
        let store = DocumentStore::new(&config.store_dir).await?;
        let chunker = ParagraphChunker::new(config.chunking.max_chars);

        info!(
            "Document pipeline initialized (embedder: {}, generator: {})",
            embedder.name(),
            generator.name()
        );

        Ok(Self {
            config,
            store,
            chunker,
            embedder,
            extractor,
            generator,
            ingest_locks: Mutex::new(HashMap::new()),
        })
    }

    /// Ingest a document and return its content-addressed id.
    ///
    /// Idempotent: re-ingesting bytes that were already indexed returns
    /// the cached id without extraction or embedding calls. On a miss,
    /// the document is extracted, chunked, embedded one call per chunk
    /// (issued concurrently, joined before the write), and persisted
    /// atomically. Any chunk embedding failure fails the whole ingest;
    /// nothing is stored.
    pub async fn ingest(&self, bytes: &[u8]) -> Result<DocumentId> {
        let id = DocumentId::from_bytes(bytes);

        if self.store.exists(&id).await {
            debug!("Ingest cache hit for {id}");
            return Ok(id);
        }

        let lock = self.writer_lock(&id).await;
        let _guard = lock.lock().await;

        // A concurrent ingest of the same bytes may have finished while
        // we waited for the lock.
        if self.store.exists(&id).await {
            debug!("Ingest cache hit for {id}");
            return Ok(id);
        }

        let text = self.extractor.extract(bytes).await?;
        let chunks = self.chunker.chunk(&text);
        debug!("Chunked {id} into {} chunks", chunks.len());

        let responses = try_join_all(chunks.iter().map(|chunk| {
            self.embedder
                .embed(EmbeddingRequest::new(&chunk.text, InputMode::Document))
        }))
        .await?;

        let model = responses
            .first()
            .map(|r| r.model.clone())
            .unwrap_or_else(|| self.embedder.default_model().to_string());

        let embedded: Vec<EmbeddedChunk> = chunks
            .into_iter()
            .zip(responses)
            .map(|(chunk, response)| EmbeddedChunk::new(chunk, response.embedding))
            .collect();

        let index = DocumentIndex::new(embedded, model);
        self.store.store(&id, &index).await?;

        info!("Indexed {id} ({} chunks)", index.len());
        Ok(id)
    }

    /// Answer a question against a previously ingested document.
    ///
    /// Fails with a not-found store error before any provider call when
    /// the document was never ingested. Otherwise embeds the question in
    /// query mode, ranks the cached chunks, and forwards the top-k as
    /// context to the generator.
    pub async fn answer(&self, question: &str, id: &DocumentId) -> Result<Answer> {
        if !self.store.exists(id).await {
            return Err(StoreError::NotFound { id: id.to_string() }.into());
        }

        let index = self.store.load(id).await?;

        let query = self
            .embedder
            .embed(EmbeddingRequest::new(question, InputMode::Query))
            .await?;

        let ranked =
            top_k(&query.embedding, &index, self.config.retrieval.top_k).inspect_err(|e| {
                if matches!(
                    e,
                    PipelineError::Embedding(EmbeddingError::DimensionMismatch { .. })
                ) {
                    error!("Query/index dimension mismatch for {id}: {e}");
                }
            })?;

        let context = build_context(&ranked);
        debug!("Answering over {} retrieved chunks for {id}", ranked.len());

        self.generator.generate(&context, question).await
    }

    /// Get (or create) the single-writer lock for a document id.
    async fn writer_lock(&self, id: &DocumentId) -> Arc<Mutex<()>> {
        let mut locks = self.ingest_locks.lock().await;
        locks.entry(id.clone()).or_default().clone()
    }
}
