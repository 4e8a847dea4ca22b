//! In-memory task store for tests and local demos.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::auth::domain::UserId;
use crate::task::{
    domain::{
        Tag, TagId, TagName, Task, TaskFields, TaskId, TaskPriority, TaskStatus, TaskTagLink,
    },
    ports::{LinkReplaceError, TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task, tag and link tables.
///
/// Rows keep insertion order so listings are deterministic. Link-set
/// replacement runs under a single write lock and is therefore atomic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: Vec<Task>,
    tags: Vec<Tag>,
    links: Vec<TaskTagLink>,
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a global tag. Tags are managed outside the client, so this is
    /// the seeding hook for tests and demos.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] if the lock is poisoned.
    pub fn insert_tag(&self, name: TagName) -> TaskStoreResult<Tag> {
        let mut state = self.state.write().map_err(poisoned)?;
        let tag = Tag::new(name);
        state.tags.push(tag.clone());
        Ok(tag)
    }

    /// Returns the raw link records of a task in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] if the lock is poisoned.
    pub fn links_for(&self, task_id: TaskId) -> TaskStoreResult<Vec<TaskTagLink>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .links
            .iter()
            .filter(|link| link.task_id == task_id)
            .copied()
            .collect())
    }
}

fn poisoned(err: impl ToString) -> TaskStoreError {
    TaskStoreError::persistence(std::io::Error::other(err.to_string()))
}

impl InMemoryTaskState {
    fn task_mut(&mut self, id: TaskId) -> TaskStoreResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or(TaskStoreError::NotFound(id))
    }

    fn resolve_tags(&self, task_id: TaskId) -> Vec<Tag> {
        let mut tags: Vec<Tag> = self
            .links
            .iter()
            .filter(|link| link.task_id == task_id)
            .filter_map(|link| self.tags.iter().find(|tag| tag.id() == link.tag_id))
            .cloned()
            .collect();
        tags.sort_by(|left, right| left.name().cmp(right.name()));
        tags
    }

    fn validate_links(&self, links: &[TaskTagLink]) -> TaskStoreResult<()> {
        for link in links {
            if !self.tasks.iter().any(|task| task.id() == link.task_id) {
                return Err(TaskStoreError::NotFound(link.task_id));
            }
            if !self.tags.iter().any(|tag| tag.id() == link.tag_id) {
                return Err(TaskStoreError::UnknownTag(link.tag_id));
            }
        }
        Ok(())
    }

    fn push_links(&mut self, links: &[TaskTagLink]) {
        for link in links {
            if !self.links.contains(link) {
                self.links.push(*link);
            }
        }
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn list_tags(&self) -> TaskStoreResult<Vec<Tag>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut tags = state.tags.clone();
        tags.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(tags)
    }

    async fn list_tasks(&self, owner: UserId) -> TaskStoreResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut tasks: Vec<Task> = state
            .tasks
            .iter()
            .filter(|task| task.owner() == owner)
            .map(|task| {
                let mut resolved = task.clone();
                resolved.set_tags(state.resolve_tags(task.id()));
                resolved
            })
            .collect();
        tasks.sort_by_key(|task| (task.due_date().is_none(), task.due_date()));
        Ok(tasks)
    }

    async fn insert_task(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.tasks.iter().any(|existing| existing.id() == task.id()) {
            return Err(TaskStoreError::DuplicateTask(task.id()));
        }
        let mut row = task.clone();
        row.set_tags(Vec::new());
        state.tasks.push(row);
        Ok(())
    }

    async fn update_fields(&self, id: TaskId, fields: &TaskFields) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.task_mut(id)?.apply_fields(fields.clone());
        Ok(())
    }

    async fn update_status(&self, id: TaskId, status: TaskStatus) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.task_mut(id)?.set_status(status);
        Ok(())
    }

    async fn update_priority(&self, id: TaskId, priority: TaskPriority) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.task_mut(id)?.set_priority(Some(priority));
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id() != id);
        if state.tasks.len() == before {
            return Err(TaskStoreError::NotFound(id));
        }
        state.links.retain(|link| link.task_id != id);
        Ok(())
    }

    async fn delete_links(&self, task_id: TaskId) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.links.retain(|link| link.task_id != task_id);
        Ok(())
    }

    async fn insert_links(&self, links: &[TaskTagLink]) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.validate_links(links)?;
        state.push_links(links);
        Ok(())
    }

    async fn replace_links(
        &self,
        task_id: TaskId,
        tag_ids: &[TagId],
    ) -> Result<(), LinkReplaceError> {
        let mut state = self
            .state
            .write()
            .map_err(|err| LinkReplaceError::Unchanged(poisoned(err)))?;
        let links = TaskTagLink::for_task(task_id, tag_ids);
        state.task_mut(task_id).map_err(LinkReplaceError::Unchanged)?;
        state
            .validate_links(&links)
            .map_err(LinkReplaceError::Unchanged)?;

        state.links.retain(|link| link.task_id != task_id);
        state.push_links(&links);
        Ok(())
    }
}
