//! In-memory event store adapter.

mod store;

pub use store::InMemoryEventStore;
