//! Object storage port.

use crate::document::domain::StorageKey;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::sync::Arc;
use thiserror::Error;

/// Result type for object storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Bucketed blob store of the hosted backend.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores `bytes` under `key` and returns the key the backend recorded.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::AlreadyExists`] when the key is taken.
    async fn upload(
        &self,
        bucket: &str,
        key: &StorageKey,
        bytes: &[u8],
    ) -> StorageResult<StorageKey>;

    /// Fetches the bytes stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] when nothing is stored there.
    async fn download(&self, bucket: &str, key: &StorageKey) -> StorageResult<Vec<u8>>;

    /// Removes the objects under `keys`. Missing keys are ignored.
    async fn remove(&self, bucket: &str, keys: &[StorageKey]) -> StorageResult<()>;
}

/// Errors returned by object storage implementations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// An object already exists under the key.
    #[error("object already exists: {0}")]
    AlreadyExists(StorageKey),

    /// No object exists under the key.
    #[error("object not found: {0}")]
    NotFound(StorageKey),

    /// Backend failure.
    #[error("storage backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl StorageError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
