//! Upcoming-events view.

use super::CalendarEvent;
use chrono::{DateTime, Utc};

/// Returns the events starting at or after `now`, earliest first.
///
/// The sort is stable, so events sharing a start keep their input order.
/// Nothing is cached; callers recompute on every render.
#[must_use]
pub fn upcoming_events(events: &[CalendarEvent], now: DateTime<Utc>) -> Vec<&CalendarEvent> {
    let mut upcoming: Vec<&CalendarEvent> = events
        .iter()
        .filter(|event| event.starts_at() >= now)
        .collect();
    upcoming.sort_by_key(|event| event.starts_at());
    upcoming
}
