//! In-memory document metadata table.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::document::{
    domain::{Document, DocumentId},
    ports::{DocumentRepository, DocumentRepositoryError, DocumentRepositoryResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory document records kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentRepository {
    documents: Arc<RwLock<Vec<Document>>>,
}

impl InMemoryDocumentRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> DocumentRepositoryError {
    DocumentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn insert(&self, document: &Document) -> DocumentRepositoryResult<()> {
        let mut documents = self.documents.write().map_err(poisoned)?;
        if documents.iter().any(|existing| existing.id() == document.id()) {
            return Err(DocumentRepositoryError::DuplicateDocument(document.id()));
        }
        documents.push(document.clone());
        Ok(())
    }

    async fn list_for_task(&self, task_id: TaskId) -> DocumentRepositoryResult<Vec<Document>> {
        let documents = self.documents.read().map_err(poisoned)?;
        let mut attached: Vec<Document> = documents
            .iter()
            .filter(|document| document.task_id() == task_id)
            .cloned()
            .collect();
        attached.sort_by_key(Document::uploaded_at);
        Ok(attached)
    }

    async fn delete(&self, id: DocumentId) -> DocumentRepositoryResult<()> {
        let mut documents = self.documents.write().map_err(poisoned)?;
        let before = documents.len();
        documents.retain(|document| document.id() != id);
        if documents.len() == before {
            return Err(DocumentRepositoryError::NotFound(id));
        }
        Ok(())
    }
}
