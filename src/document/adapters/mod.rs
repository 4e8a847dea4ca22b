//! Adapter implementations for the document ports.

pub mod memory;
