//! Port contracts for task persistence.
//!
//! Ports define backend-agnostic interfaces used by the client coordinator.

pub mod store;

#[cfg(test)]
pub use store::MockTaskStore;
pub use store::{
    LinkReplaceError, TaskStore, TaskStoreError, TaskStoreResult, replace_links_sequentially,
};
