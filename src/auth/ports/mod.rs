//! Port contracts for the authentication collaborator.

pub mod provider;

#[cfg(test)]
pub use provider::MockAuthProvider;
pub use provider::{AuthProvider, AuthResult};
