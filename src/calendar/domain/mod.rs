//! Domain model for calendar events.

mod error;
mod event;
mod ids;
mod upcoming;

pub use error::CalendarDomainError;
pub use event::{CalendarEvent, DEFAULT_EVENT_DURATION, EventDraft, EventTitle};
pub use ids::EventId;
pub use upcoming::upcoming_events;
