//! Step definitions for board drag-and-drop scenarios.

pub mod then;
pub mod when;
