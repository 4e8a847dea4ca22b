//! Client error taxonomy.
//!
//! Every variant renders to the message shown in the last-error banner.

use crate::auth::domain::AuthError;
use crate::calendar::{
    domain::{CalendarDomainError, EventId},
    ports::EventStoreError,
};
use crate::document::services::DocumentServiceError;
use crate::task::{domain::TaskId, ports::TaskStoreError};
use thiserror::Error;
use tokio::task::JoinError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// A read of tags, tasks or events failed.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Listing tags failed.
    #[error("failed to load tags: {0}")]
    Tags(#[source] TaskStoreError),

    /// Listing tasks failed.
    #[error("failed to load tasks: {0}")]
    Tasks(#[source] TaskStoreError),

    /// Listing events failed.
    #[error("failed to load events: {0}")]
    Events(#[source] EventStoreError),
}

/// A create, update or delete failed.
#[derive(Debug, Clone, Error)]
pub enum WriteError {
    /// A task row write failed.
    #[error("failed to save task: {0}")]
    Task(#[from] TaskStoreError),

    /// A tag link write failed before anything was changed.
    #[error("failed to save task tags: {0}")]
    Links(#[source] TaskStoreError),

    /// An event write failed.
    #[error("failed to save event: {0}")]
    Event(#[from] EventStoreError),
}

/// Errors surfaced by the client core.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Loading data failed; the previous collections are intact.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A remote write failed.
    #[error(transparent)]
    Write(#[from] WriteError),

    /// A task's tag links were cleared but not rewritten.
    #[error("tags of task {task_id} may be inconsistent, reload to confirm: {source}")]
    TagsInconsistent {
        /// Task whose stored links may be incomplete.
        task_id: TaskId,
        /// Failure of the link insert.
        #[source]
        source: TaskStoreError,
    },

    /// Sign-in, sign-up or sign-out failed.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// A document upload, download or delete failed.
    #[error(transparent)]
    Document(#[from] DocumentServiceError),

    /// The event form was not valid.
    #[error("invalid event: {0}")]
    InvalidEvent(#[from] CalendarDomainError),

    /// The operation needs a signed-in user.
    #[error("not signed in")]
    NotSignedIn,

    /// The task is not in the loaded task list.
    #[error("task {0} is not loaded")]
    UnknownTask(TaskId),

    /// The event is not in the loaded event list.
    #[error("event {0} is not loaded")]
    UnknownEvent(EventId),

    /// A background write was cancelled or panicked.
    #[error("background write did not finish: {0}")]
    Interrupted(#[from] JoinError),
}
