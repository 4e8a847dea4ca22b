//! Remote store port for calendar events.

use crate::auth::domain::UserId;
use crate::calendar::domain::{CalendarEvent, EventId};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::sync::Arc;
use thiserror::Error;

/// Result type for event store operations.
pub type EventStoreResult<T> = Result<T, EventStoreError>;

/// Event persistence contract of the hosted backend.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Returns the owner's events ordered by start ascending.
    async fn list_events(&self, owner: UserId) -> EventStoreResult<Vec<CalendarEvent>>;

    /// Stores a new event.
    ///
    /// # Errors
    ///
    /// Returns [`EventStoreError::DuplicateEvent`] when the identifier exists.
    async fn insert_event(&self, event: &CalendarEvent) -> EventStoreResult<()>;

    /// Overwrites an existing event.
    ///
    /// # Errors
    ///
    /// Returns [`EventStoreError::NotFound`] when the event does not exist.
    async fn update_event(&self, event: &CalendarEvent) -> EventStoreResult<()>;

    /// Deletes an event.
    async fn delete_event(&self, id: EventId) -> EventStoreResult<()>;
}

/// Errors returned by event store implementations.
#[derive(Debug, Clone, Error)]
pub enum EventStoreError {
    /// An event with the same identifier already exists.
    #[error("duplicate event identifier: {0}")]
    DuplicateEvent(EventId),

    /// The event was not found.
    #[error("event not found: {0}")]
    NotFound(EventId),

    /// Backend failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl EventStoreError {
    /// Wraps a backend error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
