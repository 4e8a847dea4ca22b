//! Calendar event record and its create/edit payload.

use super::{CalendarDomainError, EventId};
use crate::auth::domain::UserId;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of an event whose draft does not name an end, in minutes.
pub const DEFAULT_EVENT_DURATION: i64 = 60;

/// Non-empty, trimmed event title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTitle(String);

impl EventTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarDomainError::EmptyTitle`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, CalendarDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CalendarDomainError::EmptyTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload submitted by the event form for both create and edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    title: String,
    description: Option<String>,
    starts_at: DateTime<Utc>,
    ends_at: Option<DateTime<Utc>>,
    all_day: bool,
    location: Option<String>,
}

impl EventDraft {
    /// Creates a draft with the required title and start.
    #[must_use]
    pub fn new(title: impl Into<String>, starts_at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            description: None,
            starts_at,
            ends_at: None,
            all_day: false,
            location: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets an explicit end.
    #[must_use]
    pub const fn with_end(mut self, ends_at: DateTime<Utc>) -> Self {
        self.ends_at = Some(ends_at);
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Marks the event as lasting the whole day.
    #[must_use]
    pub const fn all_day(mut self) -> Self {
        self.all_day = true;
        self
    }

    fn resolved_end(&self) -> Result<DateTime<Utc>, CalendarDomainError> {
        match self.ends_at {
            Some(ends_at) => Ok(ends_at),
            None => self
                .starts_at
                .checked_add_signed(TimeDelta::minutes(DEFAULT_EVENT_DURATION))
                .ok_or(CalendarDomainError::EndOutOfRange {
                    starts_at: self.starts_at,
                }),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

/// Appointment owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    id: EventId,
    owner: UserId,
    title: EventTitle,
    description: Option<String>,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    all_day: bool,
    location: Option<String>,
    created_at: DateTime<Utc>,
}

impl CalendarEvent {
    /// Creates an event from a draft.
    ///
    /// Blank descriptions and locations are dropped. A draft without an end
    /// lasts [`DEFAULT_EVENT_DURATION`] minutes.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarDomainError::EmptyTitle`] when the title is blank
    /// and [`CalendarDomainError::EndOutOfRange`] when no end is given and
    /// the default one cannot be represented.
    pub fn new(
        owner: UserId,
        draft: EventDraft,
        clock: &impl Clock,
    ) -> Result<Self, CalendarDomainError> {
        let mut event = Self {
            id: EventId::new(),
            owner,
            title: EventTitle::new(draft.title.clone())?,
            description: None,
            starts_at: draft.starts_at,
            ends_at: draft.starts_at,
            all_day: false,
            location: None,
            created_at: clock.utc(),
        };
        event.apply_draft(draft)?;
        Ok(event)
    }

    /// Overwrites every editable field from a draft.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarDomainError::EmptyTitle`] when the title is blank
    /// and [`CalendarDomainError::EndOutOfRange`] when the default end
    /// overflows. The event is left unchanged in both cases.
    pub fn apply_draft(&mut self, draft: EventDraft) -> Result<(), CalendarDomainError> {
        let title = EventTitle::new(draft.title.clone())?;
        let ends_at = draft.resolved_end()?;
        self.title = title;
        self.description = non_blank(draft.description);
        self.starts_at = draft.starts_at;
        self.ends_at = ends_at;
        self.all_day = draft.all_day;
        self.location = non_blank(draft.location);
        Ok(())
    }

    /// Returns the event identifier.
    #[must_use]
    pub const fn id(&self) -> EventId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &EventTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the start instant.
    #[must_use]
    pub const fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    /// Returns the end instant.
    #[must_use]
    pub const fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    /// Returns `true` for whole-day events.
    #[must_use]
    pub const fn is_all_day(&self) -> bool {
        self.all_day
    }

    /// Returns the location, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` when the event starts on the given UTC calendar day.
    #[must_use]
    pub fn starts_on(&self, date: NaiveDate) -> bool {
        self.starts_at.date_naive() == date
    }
}
