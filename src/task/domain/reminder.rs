//! Reminder records attached to tasks.
//!
//! Reminders are modelled but not yet scheduled: nothing in the client
//! creates or fires them. Whether delivery happens on the client or in a
//! backend job is still undecided.

use super::{ReminderId, TaskDomainError, TaskId};
use crate::auth::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Delivery status of a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderStatus {
    /// Waiting for its fire time.
    Pending,
    /// Delivered to the user.
    Sent,
    /// Withdrawn before delivery.
    Cancelled,
}

impl ReminderStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Sent => "SENT",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Scheduled nudge for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    id: ReminderId,
    task_id: TaskId,
    user_id: UserId,
    remind_at: DateTime<Utc>,
    status: ReminderStatus,
    created_at: DateTime<Utc>,
}

impl Reminder {
    /// Creates a pending reminder.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        user_id: UserId,
        remind_at: DateTime<Utc>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: ReminderId::new(),
            task_id,
            user_id,
            remind_at,
            status: ReminderStatus::Pending,
            created_at: clock.utc(),
        }
    }

    /// Returns the reminder identifier.
    #[must_use]
    pub const fn id(&self) -> ReminderId {
        self.id
    }

    /// Returns the task the reminder belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the user to remind.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the fire time.
    #[must_use]
    pub const fn remind_at(&self) -> DateTime<Utc> {
        self.remind_at
    }

    /// Returns the delivery status.
    #[must_use]
    pub const fn status(&self) -> ReminderStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` when the reminder is pending and its time has come.
    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.status == ReminderStatus::Pending && self.remind_at <= now
    }

    /// Marks a pending reminder as delivered.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidReminderTransition`] unless the
    /// reminder is pending.
    pub fn mark_sent(&mut self) -> Result<(), TaskDomainError> {
        self.transition(ReminderStatus::Sent)
    }

    /// Withdraws a pending reminder.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidReminderTransition`] unless the
    /// reminder is pending.
    pub fn cancel(&mut self) -> Result<(), TaskDomainError> {
        self.transition(ReminderStatus::Cancelled)
    }

    fn transition(&mut self, to: ReminderStatus) -> Result<(), TaskDomainError> {
        if self.status != ReminderStatus::Pending {
            return Err(TaskDomainError::InvalidReminderTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}
