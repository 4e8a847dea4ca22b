//! Document metadata record.

use super::{DocumentId, DocumentUpload, FileName, StorageKey};
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version stamped on every new upload. Re-uploading a file creates a new
/// record rather than bumping this.
pub const DOCUMENT_VERSION: u32 = 1;

/// Metadata of a file attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    task_id: TaskId,
    file_name: FileName,
    media_type: String,
    size: u64,
    storage_key: StorageKey,
    version: u32,
    uploaded_at: DateTime<Utc>,
}

impl Document {
    /// Creates the record for an upload stored under `storage_key`.
    #[must_use]
    pub fn for_upload(
        task_id: TaskId,
        upload: &DocumentUpload,
        storage_key: StorageKey,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: DocumentId::new(),
            task_id,
            file_name: upload.file_name().clone(),
            media_type: upload.media_type().to_owned(),
            size: upload.size(),
            storage_key,
            version: DOCUMENT_VERSION,
            uploaded_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> DocumentId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the original file name.
    #[must_use]
    pub const fn file_name(&self) -> &FileName {
        &self.file_name
    }

    /// Returns the media type.
    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Returns the size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the object storage key.
    #[must_use]
    pub const fn storage_key(&self) -> &StorageKey {
        &self.storage_key
    }

    /// Returns the record version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the upload timestamp.
    #[must_use]
    pub const fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }
}
