//! Flat-file persistence for document indexes.
//!
//! One JSON file per document id under a root directory. Writes go to a
//! temporary path first and are renamed into place, so `load` can never
//! observe a partially-written index.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};

use crate::document::{DocumentId, DocumentIndex};
use crate::error::{Result, StoreError};

/// Storage backend for embedded document indexes.
///
/// The store is the single source of truth for whether a document has
/// been indexed. Indexes are immutable: `store` refuses to overwrite,
/// and there is no delete.
pub struct DocumentStore {
    /// Root directory holding one `<id>.json` per document.
    root: PathBuf,
}

impl DocumentStore {
    /// Create a new store rooted at the given directory.
    ///
    /// This will create the directory if it doesn't exist.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(&root)
            .await
            .map_err(|e| StoreError::CreateDirectory(format!("{}: {e}", root.display())))?;

        info!("Document store ready at {}", root.display());
        Ok(Self { root })
    }

    /// The path for a document's index file.
    fn index_path(&self, id: &DocumentId) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    /// Check whether an index was previously stored for `id`.
    pub async fn exists(&self, id: &DocumentId) -> bool {
        fs::try_exists(self.index_path(id)).await.unwrap_or(false)
    }

    /// Persist the index for `id`.
    ///
    /// Fails with [`StoreError::AlreadyIndexed`] if an index is already
    /// present; stored indexes are never updated.
    pub async fn store(&self, id: &DocumentId, index: &DocumentIndex) -> Result<()> {
        let path = self.index_path(id);

        if self.exists(id).await {
            return Err(StoreError::AlreadyIndexed {
                id: id.to_string(),
            });
        }

        let content = serde_json::to_string(index)?;

        // Write atomically using a temp file
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &content)
            .await
            .map_err(|e| StoreError::WriteFile(format!("{}: {e}", temp_path.display())))?;

        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| StoreError::WriteFile(format!("{}: {e}", path.display())))?;

        debug!("Stored index for {id} ({} chunks)", index.len());
        Ok(())
    }

    /// Load the index for `id`.
    ///
    /// Fails with [`StoreError::NotFound`] if no index exists.
    pub async fn load(&self, id: &DocumentId) -> Result<DocumentIndex> {
        let path = self.index_path(id);

        if !self.exists(id).await {
            return Err(StoreError::NotFound {
                id: id.to_string(),
            });
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| StoreError::ReadFile(format!("{}: {e}", path.display())))?;

        let index: DocumentIndex = serde_json::from_str(&content)?;
        debug!("Loaded index for {id} ({} chunks)", index.len());
        Ok(index)
    }
}
