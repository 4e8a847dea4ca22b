//! Port contracts for calendar event persistence.

pub mod store;

#[cfg(test)]
pub use store::MockEventStore;
pub use store::{EventStore, EventStoreError, EventStoreResult};
