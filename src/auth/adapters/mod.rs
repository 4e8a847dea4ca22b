//! Adapter implementations for the authentication port.

pub mod memory;
