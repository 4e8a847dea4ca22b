//! Client application core.
//!
//! Holds the in-memory view of the signed-in user's data and the rules for
//! changing it:
//!
//! - [`state`]: the reducer-style state container and its transitions
//! - [`coordinator`]: authoritative and optimistic remote mutations
//! - [`board`]: kanban partition and drag-drop resolution
//! - [`session`]: sign-in, sign-up, sign-out and session tracking
//! - [`export`]: plain-text task list export
//! - [`error`]: the client error taxonomy shown in the error banner

pub mod board;
pub mod coordinator;
pub mod error;
pub mod export;
pub mod session;
pub mod state;

pub use board::{Board, ColumnRegion, DragEnd, DropTarget, Point, Rect, resolve_drop};
pub use coordinator::{MutationCoordinator, PendingWrite};
pub use error::{ClientError, ClientResult, FetchError, WriteError};
pub use export::{ExportError, render_task_export, write_task_export};
pub use session::SessionSync;
pub use state::{ClientState, Snapshot, StateChange};

#[cfg(test)]
mod tests;
