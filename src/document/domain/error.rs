//! Error types for document validation.

use thiserror::Error;

/// Errors returned while preparing a document upload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentDomainError {
    /// The file name is empty after trimming.
    #[error("file name is required")]
    EmptyFileName,

    /// The file name contains a path separator or is a dot entry.
    #[error("file name must not contain a path: {0}")]
    PathInFileName(String),

    /// The source path does not end in a file name.
    #[error("path has no file name: {0}")]
    MissingFileName(String),

    /// The source file could not be read.
    #[error("failed to read {path}: {message}")]
    Unreadable {
        /// Path relative to the source directory.
        path: String,
        /// Underlying I/O failure.
        message: String,
    },
}
