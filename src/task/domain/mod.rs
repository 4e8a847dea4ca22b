//! Domain model for tasks, tags and reminders.
//!
//! Tasks are owned by a single user; tags are global and attached to tasks
//! through [`TaskTagLink`] join records whose existence alone implies
//! membership.

mod error;
mod ids;
mod reminder;
mod tag;
mod task;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{ReminderId, TagId, TaskId};
pub use reminder::{Reminder, ReminderStatus};
pub use tag::{Tag, TagName, TaskTagLink};
pub use task::{Task, TaskFields, TaskPriority, TaskStatus, TaskTitle};
