//! Domain model for task documents.

mod document;
mod error;
mod ids;
mod key;
mod upload;

pub use document::{DOCUMENT_VERSION, Document};
pub use error::DocumentDomainError;
pub use ids::DocumentId;
pub use key::StorageKey;
pub use upload::{DEFAULT_MEDIA_TYPE, DocumentUpload, FileName};
