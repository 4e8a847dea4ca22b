//! Task, tag and reminder records for planboard.
//!
//! Tasks move across a three-column kanban board (`TODO`, `IN_PROGRESS`,
//! `DONE`), carry an optional schedule and priority, and are labelled with
//! global tags through a join record. Persistence is delegated to a hosted
//! backend reached through the [`ports::TaskStore`] port. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
