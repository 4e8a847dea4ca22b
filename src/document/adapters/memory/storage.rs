//! In-memory object storage keyed by bucket and object key.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::document::{
    domain::StorageKey,
    ports::{ObjectStorage, StorageError, StorageResult},
};

type ObjectMap = HashMap<(String, StorageKey), Vec<u8>>;

/// Thread-safe in-memory blob store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryObjectStorage {
    objects: Arc<RwLock<ObjectMap>>,
}

impl InMemoryObjectStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when an object exists under `bucket` and `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] if the lock is poisoned.
    pub fn contains(&self, bucket: &str, key: &StorageKey) -> StorageResult<bool> {
        let objects = self.objects.read().map_err(poisoned)?;
        Ok(objects.contains_key(&(bucket.to_owned(), key.clone())))
    }

    /// Returns the number of stored objects across all buckets.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] if the lock is poisoned.
    pub fn object_count(&self) -> StorageResult<usize> {
        let objects = self.objects.read().map_err(poisoned)?;
        Ok(objects.len())
    }
}

fn poisoned(err: impl ToString) -> StorageError {
    StorageError::backend(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn upload(
        &self,
        bucket: &str,
        key: &StorageKey,
        bytes: &[u8],
    ) -> StorageResult<StorageKey> {
        let mut objects = self.objects.write().map_err(poisoned)?;
        let slot = (bucket.to_owned(), key.clone());
        if objects.contains_key(&slot) {
            return Err(StorageError::AlreadyExists(key.clone()));
        }
        objects.insert(slot, bytes.to_vec());
        Ok(key.clone())
    }

    async fn download(&self, bucket: &str, key: &StorageKey) -> StorageResult<Vec<u8>> {
        let objects = self.objects.read().map_err(poisoned)?;
        objects
            .get(&(bucket.to_owned(), key.clone()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.clone()))
    }

    async fn remove(&self, bucket: &str, keys: &[StorageKey]) -> StorageResult<()> {
        let mut objects = self.objects.write().map_err(poisoned)?;
        for key in keys {
            objects.remove(&(bucket.to_owned(), key.clone()));
        }
        Ok(())
    }
}
