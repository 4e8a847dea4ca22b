//! Error types for calendar event validation.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while building calendar events.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalendarDomainError {
    /// The event title is empty after trimming.
    #[error("event title is required")]
    EmptyTitle,

    /// The default end would fall outside the representable time range.
    #[error("event starting at {starts_at} has no representable end")]
    EndOutOfRange {
        /// Requested start.
        starts_at: DateTime<Utc>,
    },
}
