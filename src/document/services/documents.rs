//! Upload, download, delete and listing of task documents.

use crate::document::{
    domain::{Document, DocumentUpload, StorageKey},
    ports::{DocumentRepository, DocumentRepositoryError, ObjectStorage, StorageError},
};
use crate::task::domain::TaskId;
use mockable::Clock;
use std::slice;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Service-level errors for document operations.
#[derive(Debug, Clone, Error)]
pub enum DocumentServiceError {
    /// Storing the bytes failed.
    #[error("upload failed: {0}")]
    Upload(#[source] StorageError),

    /// Fetching the bytes failed.
    #[error("download failed: {0}")]
    Download(#[source] StorageError),

    /// Removing the bytes failed; the record is left in place.
    #[error("failed to delete stored file: {0}")]
    StorageDelete(#[source] StorageError),

    /// The metadata record could not be read or written.
    #[error("document record error: {0}")]
    Record(#[from] DocumentRepositoryError),
}

/// Result type for document service operations.
pub type DocumentServiceResult<T> = Result<T, DocumentServiceError>;

/// Document orchestration over object storage and the metadata table.
pub struct DocumentService<S, R, C>
where
    S: ObjectStorage,
    R: DocumentRepository,
    C: Clock + Send + Sync,
{
    storage: Arc<S>,
    repository: Arc<R>,
    clock: Arc<C>,
    bucket: String,
}

impl<S, R, C> Clone for DocumentService<S, R, C>
where
    S: ObjectStorage,
    R: DocumentRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            bucket: self.bucket.clone(),
        }
    }
}

impl<S, R, C> DocumentService<S, R, C>
where
    S: ObjectStorage,
    R: DocumentRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service writing to `bucket`.
    #[must_use]
    pub fn new(
        storage: Arc<S>,
        repository: Arc<R>,
        clock: Arc<C>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            repository,
            clock,
            bucket: bucket.into(),
        }
    }

    /// Returns the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Stores a file for a task and records its metadata at version 1.
    ///
    /// When the record cannot be written the stored object is removed again
    /// on a best-effort basis.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentServiceError::Upload`] when the bytes cannot be
    /// stored and [`DocumentServiceError::Record`] when the metadata insert
    /// fails.
    #[instrument(skip(self, upload), fields(file = %upload.file_name()))]
    pub async fn upload(
        &self,
        task_id: TaskId,
        upload: &DocumentUpload,
    ) -> DocumentServiceResult<Document> {
        let uploaded_at = self.clock.utc();
        let key = StorageKey::for_upload(task_id, uploaded_at, upload.file_name());
        let stored_key = self
            .storage
            .upload(&self.bucket, &key, upload.bytes())
            .await
            .map_err(DocumentServiceError::Upload)?;

        let document = Document::for_upload(task_id, upload, stored_key, uploaded_at);
        if let Err(err) = self.repository.insert(&document).await {
            self.discard_object(document.storage_key()).await;
            return Err(err.into());
        }

        debug!(document_id = %document.id(), key = %document.storage_key(), "document uploaded");
        Ok(document)
    }

    async fn discard_object(&self, key: &StorageKey) {
        if let Err(cleanup) = self
            .storage
            .remove(&self.bucket, slice::from_ref(key))
            .await
        {
            warn!(key = %key, error = %cleanup, "failed to remove orphaned upload");
        }
    }

    /// Fetches a document's bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentServiceError::Download`] when storage fails.
    #[instrument(skip(self, document), fields(document_id = %document.id()))]
    pub async fn download(&self, document: &Document) -> DocumentServiceResult<Vec<u8>> {
        self.storage
            .download(&self.bucket, document.storage_key())
            .await
            .map_err(DocumentServiceError::Download)
    }

    /// Removes a document's bytes and then its record.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentServiceError::StorageDelete`] when the object cannot
    /// be removed, in which case the record is kept, and
    /// [`DocumentServiceError::Record`] when the record delete fails.
    #[instrument(skip(self, document), fields(document_id = %document.id()))]
    pub async fn delete(&self, document: &Document) -> DocumentServiceResult<()> {
        self.storage
            .remove(&self.bucket, slice::from_ref(document.storage_key()))
            .await
            .map_err(DocumentServiceError::StorageDelete)?;
        self.repository.delete(document.id()).await?;
        debug!("document deleted");
        Ok(())
    }

    /// Lists a task's documents, oldest upload first.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentServiceError::Record`] when the listing fails.
    #[instrument(skip(self))]
    pub async fn list(&self, task_id: TaskId) -> DocumentServiceResult<Vec<Document>> {
        Ok(self.repository.list_for_task(task_id).await?)
    }
}
