//! Reducer-style client state container.

use crate::auth::domain::{Session, UserId};
use crate::calendar::domain::{CalendarEvent, EventId};
use crate::task::domain::{Tag, Task, TaskId, TaskPriority, TaskStatus};
use chrono::NaiveDate;

/// Freshly loaded tags, tasks and events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Every tag, ordered by name.
    pub tags: Vec<Tag>,
    /// The user's tasks, ordered by due date with undated tasks last.
    pub tasks: Vec<Task>,
    /// The user's events, ordered by start.
    pub events: Vec<CalendarEvent>,
}

/// A transition of [`ClientState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    /// A user signed in. Data loaded for another user is dropped.
    SessionStarted(Session),
    /// A load for `owner` completed; all three collections are replaced
    /// together. Ignored unless `owner` is still the signed-in user.
    Loaded {
        /// User the snapshot was fetched for.
        owner: UserId,
        /// Fetched collections.
        snapshot: Snapshot,
    },
    /// The user signed out; the session and all collections are dropped.
    Cleared,
    /// A task moved to another column.
    StatusChanged {
        /// Task to change.
        task_id: TaskId,
        /// New column.
        status: TaskStatus,
    },
    /// A task's priority changed.
    PriorityChanged {
        /// Task to change.
        task_id: TaskId,
        /// New priority.
        priority: Option<TaskPriority>,
    },
    /// A task was deleted.
    TaskRemoved(TaskId),
    /// A failure message replaces the banner.
    ErrorRaised(String),
    /// The banner was dismissed.
    ErrorDismissed,
}

/// In-memory view of the signed-in user's data.
///
/// State only changes through [`ClientState::apply`]. Changes that name a
/// task absent from the list are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
    session: Option<Session>,
    tags: Vec<Tag>,
    tasks: Vec<Task>,
    events: Vec<CalendarEvent>,
    last_error: Option<String>,
}

impl ClientState {
    /// Creates an empty, signed-out state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one transition.
    pub fn apply(&mut self, change: StateChange) {
        match change {
            StateChange::SessionStarted(session) => {
                if !self.is_signed_in_as(session.user_id()) {
                    self.clear_collections();
                }
                self.session = Some(session);
            }
            StateChange::Loaded { owner, snapshot } => {
                if self.is_signed_in_as(owner) {
                    self.tags = snapshot.tags;
                    self.tasks = snapshot.tasks;
                    self.events = snapshot.events;
                }
            }
            StateChange::Cleared => {
                self.session = None;
                self.clear_collections();
            }
            StateChange::StatusChanged { task_id, status } => {
                if let Some(task) = self.task_mut(task_id) {
                    task.set_status(status);
                }
            }
            StateChange::PriorityChanged { task_id, priority } => {
                if let Some(task) = self.task_mut(task_id) {
                    task.set_priority(priority);
                }
            }
            StateChange::TaskRemoved(task_id) => self.tasks.retain(|task| task.id() != task_id),
            StateChange::ErrorRaised(message) => self.last_error = Some(message),
            StateChange::ErrorDismissed => self.last_error = None,
        }
    }

    /// Returns `true` when `user_id` holds the current session.
    #[must_use]
    pub fn is_signed_in_as(&self, user_id: UserId) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.user_id() == user_id)
    }

    fn clear_collections(&mut self) {
        self.tags.clear();
        self.tasks.clear();
        self.events.clear();
    }

    fn task_mut(&mut self, task_id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == task_id)
    }

    /// Returns the current session.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Returns the loaded tags.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Returns the loaded tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the loaded events.
    #[must_use]
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// Returns the banner message, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Looks up a loaded task.
    #[must_use]
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    /// Looks up a loaded event.
    #[must_use]
    pub fn event(&self, event_id: EventId) -> Option<&CalendarEvent> {
        self.events.iter().find(|event| event.id() == event_id)
    }

    /// Returns `true` when a task is due or an event starts on `date`.
    #[must_use]
    pub fn has_entries_on(&self, date: NaiveDate) -> bool {
        self.tasks.iter().any(|task| task.due_date() == Some(date))
            || self.events.iter().any(|event| event.starts_on(date))
    }
}
