//! Document metadata repository port.

use crate::document::domain::{Document, DocumentId};
use crate::task::domain::TaskId;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::sync::Arc;
use thiserror::Error;

/// Result type for document repository operations.
pub type DocumentRepositoryResult<T> = Result<T, DocumentRepositoryError>;

/// Metadata table for uploaded documents.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Stores a new record.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentRepositoryError::DuplicateDocument`] when the
    /// identifier exists.
    async fn insert(&self, document: &Document) -> DocumentRepositoryResult<()>;

    /// Returns a task's documents ordered by upload time ascending.
    async fn list_for_task(&self, task_id: TaskId) -> DocumentRepositoryResult<Vec<Document>>;

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentRepositoryError::NotFound`] when the record does not
    /// exist.
    async fn delete(&self, id: DocumentId) -> DocumentRepositoryResult<()>;
}

/// Errors returned by document repository implementations.
#[derive(Debug, Clone, Error)]
pub enum DocumentRepositoryError {
    /// A record with the same identifier already exists.
    #[error("duplicate document identifier: {0}")]
    DuplicateDocument(DocumentId),

    /// The record was not found.
    #[error("document not found: {0}")]
    NotFound(DocumentId),

    /// Backend failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DocumentRepositoryError {
    /// Wraps a backend error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
