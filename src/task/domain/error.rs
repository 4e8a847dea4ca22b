//! Error types for task domain validation and parsing.

use super::ReminderStatus;
use thiserror::Error;

/// Errors returned while constructing or mutating task domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The tag name is empty after trimming.
    #[error("tag name must not be empty")]
    EmptyTagName,

    /// The reminder lifecycle does not permit the requested change.
    #[error("reminder cannot move from {} to {}", from.as_str(), to.as_str())]
    InvalidReminderTransition {
        /// Current reminder status.
        from: ReminderStatus,
        /// Requested reminder status.
        to: ReminderStatus,
    },
}

/// Error returned while parsing a task status or board column identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a task priority.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
