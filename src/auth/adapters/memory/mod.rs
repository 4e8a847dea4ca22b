//! In-memory authentication adapter.

mod provider;

pub use provider::InMemoryAuthProvider;
