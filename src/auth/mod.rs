//! Authentication boundary for planboard.
//!
//! Sign-in, sign-up and sign-out are delegated to a hosted authentication
//! service. This module models the user identity and session values the rest
//! of the crate consumes, and the port through which session-change
//! notifications arrive:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
