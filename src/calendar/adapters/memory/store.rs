//! In-memory event store for tests and local demos.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::auth::domain::UserId;
use crate::calendar::{
    domain::{CalendarEvent, EventId},
    ports::{EventStore, EventStoreError, EventStoreResult},
};

/// Thread-safe in-memory event table kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<Vec<CalendarEvent>>>,
}

impl InMemoryEventStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> EventStoreError {
    EventStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn list_events(&self, owner: UserId) -> EventStoreResult<Vec<CalendarEvent>> {
        let events = self.events.read().map_err(poisoned)?;
        let mut owned: Vec<CalendarEvent> = events
            .iter()
            .filter(|event| event.owner() == owner)
            .cloned()
            .collect();
        owned.sort_by_key(CalendarEvent::starts_at);
        Ok(owned)
    }

    async fn insert_event(&self, event: &CalendarEvent) -> EventStoreResult<()> {
        let mut events = self.events.write().map_err(poisoned)?;
        if events.iter().any(|existing| existing.id() == event.id()) {
            return Err(EventStoreError::DuplicateEvent(event.id()));
        }
        events.push(event.clone());
        Ok(())
    }

    async fn update_event(&self, event: &CalendarEvent) -> EventStoreResult<()> {
        let mut events = self.events.write().map_err(poisoned)?;
        let slot = events
            .iter_mut()
            .find(|existing| existing.id() == event.id())
            .ok_or(EventStoreError::NotFound(event.id()))?;
        *slot = event.clone();
        Ok(())
    }

    async fn delete_event(&self, id: EventId) -> EventStoreResult<()> {
        let mut events = self.events.write().map_err(poisoned)?;
        let before = events.len();
        events.retain(|event| event.id() != id);
        if events.len() == before {
            return Err(EventStoreError::NotFound(id));
        }
        Ok(())
    }
}
