//! Upload payload and file-name validation.

use super::DocumentDomainError;
use camino::Utf8Path;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Media type recorded when the caller does not supply one.
pub const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// Original name of an uploaded file, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileName(String);

impl FileName {
    /// Creates a validated file name.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentDomainError::EmptyFileName`] when the value is blank
    /// and [`DocumentDomainError::PathInFileName`] when it contains a slash
    /// or backslash, or is `.` or `..`.
    pub fn new(value: impl Into<String>) -> Result<Self, DocumentDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DocumentDomainError::EmptyFileName);
        }
        if trimmed.contains(['/', '\\']) || matches!(trimmed, "." | "..") {
            return Err(DocumentDomainError::PathInFileName(trimmed.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the file name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// File chosen for upload: its name, media type and contents.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    file_name: FileName,
    media_type: String,
    bytes: Vec<u8>,
}

impl DocumentUpload {
    /// Creates an upload payload. A blank media type falls back to
    /// [`DEFAULT_MEDIA_TYPE`].
    #[must_use]
    pub fn new(file_name: FileName, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let media = media_type.into();
        let trimmed = media.trim();
        let resolved = if trimmed.is_empty() {
            DEFAULT_MEDIA_TYPE.to_owned()
        } else {
            trimmed.to_owned()
        };
        Self {
            file_name,
            media_type: resolved,
            bytes,
        }
    }

    /// Reads `path` from `dir` and names the upload after the path's last
    /// component.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentDomainError::MissingFileName`] when the path has no
    /// final component and [`DocumentDomainError::Unreadable`] when the read
    /// fails.
    pub fn from_dir(
        dir: &Dir,
        path: &Utf8Path,
        media_type: impl Into<String>,
    ) -> Result<Self, DocumentDomainError> {
        let name = path
            .file_name()
            .ok_or_else(|| DocumentDomainError::MissingFileName(path.to_string()))?;
        let file_name = FileName::new(name)?;
        let bytes = dir
            .read(path)
            .map_err(|err| DocumentDomainError::Unreadable {
                path: path.to_string(),
                message: err.to_string(),
            })?;
        Ok(Self::new(file_name, media_type, bytes))
    }

    /// Returns the file name.
    #[must_use]
    pub const fn file_name(&self) -> &FileName {
        &self.file_name
    }

    /// Returns the media type.
    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Returns the file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the size of the contents in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::try_from(self.bytes.len()).unwrap_or(u64::MAX)
    }
}

impl fmt::Debug for DocumentUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentUpload")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}
