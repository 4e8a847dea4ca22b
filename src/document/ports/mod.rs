//! Port contracts for document bytes and metadata.

pub mod repository;
pub mod storage;

#[cfg(test)]
pub use repository::MockDocumentRepository;
#[cfg(test)]
pub use storage::MockObjectStorage;
pub use repository::{DocumentRepository, DocumentRepositoryError, DocumentRepositoryResult};
pub use storage::{ObjectStorage, StorageError, StorageResult};
