//! Calendar events and the upcoming-events view.
//!
//! Events are owned by a single user and persisted through the
//! [`ports::EventStore`] port of the hosted backend:
//!
//! - Domain types and the upcoming filter in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
