//! Adapter implementations for the event store port.

pub mod memory;
