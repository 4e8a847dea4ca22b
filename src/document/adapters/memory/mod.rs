//! In-memory object storage and document repository.

mod repository;
mod storage;

pub use repository::InMemoryDocumentRepository;
pub use storage::InMemoryObjectStorage;
