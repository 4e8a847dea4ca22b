//! Remote store port for tasks, tags and task-tag links.

use crate::auth::domain::UserId;
use crate::task::domain::{
    Tag, TagId, Task, TaskFields, TaskId, TaskPriority, TaskStatus, TaskTagLink,
};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract of the hosted backend.
///
/// Ordering and tag join projection happen on the backend side; callers rely
/// on the documented order of each listing.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every tag ordered by name.
    async fn list_tags(&self) -> TaskStoreResult<Vec<Tag>>;

    /// Returns the owner's tasks ordered by due date ascending, with their
    /// tags resolved through the link records.
    ///
    /// Tasks without a due date come last. Ties keep insertion order.
    async fn list_tasks(&self, owner: UserId) -> TaskStoreResult<Vec<Task>>;

    /// Stores a new task row. The task's tag list is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when the identifier exists.
    async fn insert_task(&self, task: &Task) -> TaskStoreResult<()>;

    /// Overwrites the scalar fields of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update_fields(&self, id: TaskId, fields: &TaskFields) -> TaskStoreResult<()>;

    /// Moves a task to another column.
    async fn update_status(&self, id: TaskId, status: TaskStatus) -> TaskStoreResult<()>;

    /// Sets a task's priority.
    async fn update_priority(&self, id: TaskId, priority: TaskPriority) -> TaskStoreResult<()>;

    /// Deletes a task and its link records. There is no soft delete.
    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()>;

    /// Deletes every link record of a task.
    async fn delete_links(&self, task_id: TaskId) -> TaskStoreResult<()>;

    /// Inserts link records in bulk.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::UnknownTag`] or [`TaskStoreError::NotFound`]
    /// when a link references a missing row.
    async fn insert_links(&self, links: &[TaskTagLink]) -> TaskStoreResult<()>;

    /// Replaces a task's whole link set with one link per given tag.
    ///
    /// Backends with transactions apply this atomically. Backends without
    /// them can delegate to [`replace_links_sequentially`].
    async fn replace_links(
        &self,
        task_id: TaskId,
        tag_ids: &[TagId],
    ) -> Result<(), LinkReplaceError>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A link referenced a tag that does not exist.
    #[error("tag not found: {0}")]
    UnknownTag(TagId),

    /// Backend failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a backend error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Outcome of a failed link-set replacement.
#[derive(Debug, Clone, Error)]
pub enum LinkReplaceError {
    /// Nothing was changed; the previous link set is intact.
    #[error("tag links unchanged: {0}")]
    Unchanged(#[source] TaskStoreError),

    /// The previous links were deleted but the new set was not written.
    #[error("tag links for task {task_id} were cleared but not rewritten: {source}")]
    Cleared {
        /// Task whose links are now incomplete.
        task_id: TaskId,
        /// Failure of the insert step.
        #[source]
        source: TaskStoreError,
    },
}

/// Replaces a task's links with delete-all-then-insert.
///
/// The two steps are separate backend calls, so a failure between them
/// leaves the task with no tags. That case is reported as
/// [`LinkReplaceError::Cleared`] so callers can tell it apart from a
/// failure that changed nothing.
///
/// # Errors
///
/// Returns [`LinkReplaceError::Unchanged`] when the delete fails and
/// [`LinkReplaceError::Cleared`] when the insert fails.
pub async fn replace_links_sequentially<S>(
    store: &S,
    task_id: TaskId,
    tag_ids: &[TagId],
) -> Result<(), LinkReplaceError>
where
    S: TaskStore + ?Sized,
{
    store
        .delete_links(task_id)
        .await
        .map_err(LinkReplaceError::Unchanged)?;

    let links = TaskTagLink::for_task(task_id, tag_ids);
    if links.is_empty() {
        return Ok(());
    }

    store
        .insert_links(&links)
        .await
        .map_err(|source| LinkReplaceError::Cleared { task_id, source })
}
