//! Planboard: client core for a personal task board and calendar.
//!
//! This crate holds the state and rules behind a kanban task board, a
//! calendar of events and per-task document attachments, all persisted by a
//! hosted backend that is reached through ports.
//!
//! # Architecture
//!
//! Planboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure data types and validation with no I/O
//! - **Ports**: Abstract trait interfaces for the hosted backend
//! - **Adapters**: Concrete implementations of ports (in-memory for tests
//!   and demos)
//!
//! # Modules
//!
//! - [`auth`]: Credentials, sessions and the authentication port
//! - [`task`]: Tasks, tags, tag links and reminders
//! - [`calendar`]: Calendar events and the upcoming-events view
//! - [`document`]: Task attachments in object storage
//! - [`client`]: Client state, mutation coordination and the kanban board
//! - [`config`]: Layered configuration
//! - [`telemetry`]: Log subscriber installation

pub mod auth;
pub mod calendar;
pub mod client;
pub mod config;
pub mod document;
pub mod task;
pub mod telemetry;
