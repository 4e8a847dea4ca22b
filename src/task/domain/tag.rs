//! Global tags and the task-tag join record.

use super::{TagId, TaskDomainError, TaskId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty, trimmed tag name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagName(String);

impl TagName {
    /// Creates a validated tag name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTagName`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTagName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Label shared by every user's tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    id: TagId,
    name: TagName,
}

impl Tag {
    /// Creates a tag with a fresh identifier.
    #[must_use]
    pub fn new(name: TagName) -> Self {
        Self {
            id: TagId::new(),
            name,
        }
    }

    /// Reconstructs a persisted tag.
    #[must_use]
    pub const fn from_parts(id: TagId, name: TagName) -> Self {
        Self { id, name }
    }

    /// Returns the tag identifier.
    #[must_use]
    pub const fn id(&self) -> TagId {
        self.id
    }

    /// Returns the tag name.
    #[must_use]
    pub const fn name(&self) -> &TagName {
        &self.name
    }
}

/// Join record attaching a tag to a task. Carries no other attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskTagLink {
    /// Linked task.
    pub task_id: TaskId,
    /// Linked tag.
    pub tag_id: TagId,
}

impl TaskTagLink {
    /// Creates a single link.
    #[must_use]
    pub const fn new(task_id: TaskId, tag_id: TagId) -> Self {
        Self { task_id, tag_id }
    }

    /// Builds one link per distinct selected tag, keeping first-seen order.
    #[must_use]
    pub fn for_task(task_id: TaskId, tag_ids: &[TagId]) -> Vec<Self> {
        let mut links: Vec<Self> = Vec::with_capacity(tag_ids.len());
        for tag_id in tag_ids {
            if links.iter().all(|link| link.tag_id != *tag_id) {
                links.push(Self::new(task_id, *tag_id));
            }
        }
        links
    }
}
