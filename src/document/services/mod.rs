//! Application services for task documents.

mod documents;

pub use documents::{DocumentService, DocumentServiceError, DocumentServiceResult};
