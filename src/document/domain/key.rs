//! Object storage key layout.

use super::FileName;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Location of a document's bytes inside the bucket.
///
/// Uploads are keyed as `task-{task_id}/{unix_millis}-{file_name}`, so two
/// uploads of the same file land on distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    /// Builds the key for a file uploaded to a task at `uploaded_at`.
    #[must_use]
    pub fn for_upload(task_id: TaskId, uploaded_at: DateTime<Utc>, file_name: &FileName) -> Self {
        Self(format!(
            "task-{task_id}/{millis}-{file_name}",
            millis = uploaded_at.timestamp_millis()
        ))
    }

    /// Wraps a key returned by the storage backend.
    #[must_use]
    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
