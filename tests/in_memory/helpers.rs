//! Shared test helpers for in-memory integration tests.

use async_trait::async_trait;
use mockable::DefaultClock;
use planboard::{
    auth::{
        adapters::memory::InMemoryAuthProvider,
        domain::{Credentials, UserId},
    },
    calendar::adapters::memory::InMemoryEventStore,
    client::{MutationCoordinator, SessionSync},
    task::{
        adapters::memory::InMemoryTaskStore,
        domain::{
            Tag, TagId, TagName, Task, TaskFields, TaskId, TaskPriority, TaskStatus, TaskTagLink,
            TaskTitle,
        },
        ports::{LinkReplaceError, TaskStore, TaskStoreError, TaskStoreResult},
    },
};
use rstest::fixture;
use std::sync::Arc;
use tokio::sync::{Notify, Semaphore};

/// Coordinator wired to in-memory stores.
pub type TestCoordinator = MutationCoordinator<InMemoryTaskStore, InMemoryEventStore, DefaultClock>;

/// Session synchroniser wired to in-memory adapters.
pub type TestSync =
    SessionSync<InMemoryAuthProvider, InMemoryTaskStore, InMemoryEventStore, DefaultClock>;

/// In-memory backend shared by a test.
pub struct Backend {
    pub tasks: Arc<InMemoryTaskStore>,
    pub events: Arc<InMemoryEventStore>,
    pub auth: Arc<InMemoryAuthProvider>,
}

impl Backend {
    /// Builds a session synchroniser over this backend.
    #[must_use]
    pub fn session_sync(&self) -> TestSync {
        let coordinator = MutationCoordinator::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.events),
            Arc::new(DefaultClock),
        );
        SessionSync::new(Arc::clone(&self.auth), coordinator)
    }

    /// Seeds a global tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the tag.
    pub fn tag(&self, name: &str) -> Result<Tag, eyre::Report> {
        Ok(self.tasks.insert_tag(TagName::new(name)?)?)
    }
}

/// Provides an empty in-memory backend.
#[fixture]
pub fn backend() -> Backend {
    Backend {
        tasks: Arc::new(InMemoryTaskStore::new()),
        events: Arc::new(InMemoryEventStore::new()),
        auth: Arc::new(InMemoryAuthProvider::new()),
    }
}

/// Credentials used by the signed-in helpers.
///
/// # Errors
///
/// Returns an error if the fixed credentials fail validation.
pub fn credentials() -> Result<Credentials, eyre::Report> {
    Ok(Credentials::new("ada@example.com", "correct horse")?)
}

/// Registers the test account, signs in and returns the user identifier.
///
/// # Errors
///
/// Returns an error if registration, sign-in or the first load fails.
pub async fn sign_in(sync: &TestSync) -> Result<UserId, eyre::Report> {
    let credentials = credentials()?;
    sync.sign_up(&credentials).await?;
    let session = sync.sign_in(&credentials).await?;
    Ok(session.user_id())
}

/// Builds task fields with a title.
///
/// # Errors
///
/// Returns an error if the title is blank.
pub fn fields(title: &str) -> Result<TaskFields, eyre::Report> {
    Ok(TaskFields::new(TaskTitle::new(title)?))
}

/// Returns the status of `task_id` as stored remotely.
///
/// # Errors
///
/// Returns an error if the listing fails or the task is missing.
pub async fn stored_status(
    store: &impl TaskStore,
    owner: UserId,
    task_id: TaskId,
) -> Result<TaskStatus, eyre::Report> {
    let tasks = store.list_tasks(owner).await?;
    tasks
        .iter()
        .find(|task| task.id() == task_id)
        .map(Task::status)
        .ok_or_else(|| eyre::eyre!("task {task_id} is not stored"))
}

/// Store call held back by a [`GatedTaskStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Held {
    /// `update_status` waits for a release.
    StatusWrites,
    /// `list_tasks` waits for a release.
    Listings,
}

/// Task store that holds one kind of call until released.
///
/// Every other operation goes straight to the wrapped store.
#[derive(Debug, Clone)]
pub struct GatedTaskStore {
    inner: Arc<InMemoryTaskStore>,
    held: Held,
    gate: Arc<Semaphore>,
    reached: Arc<Notify>,
}

impl GatedTaskStore {
    /// Wraps `inner`, holding status writes.
    #[must_use]
    pub fn new(inner: Arc<InMemoryTaskStore>) -> Self {
        Self::holding(inner, Held::StatusWrites)
    }

    /// Wraps `inner`, holding the given kind of call.
    #[must_use]
    pub fn holding(inner: Arc<InMemoryTaskStore>, held: Held) -> Self {
        Self {
            inner,
            held,
            gate: Arc::new(Semaphore::new(0)),
            reached: Arc::new(Notify::new()),
        }
    }

    /// Lets one held call through.
    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    /// Waits until a held call is parked at the gate.
    pub async fn reached(&self) {
        self.reached.notified().await;
    }

    async fn pass(&self, call: Held) -> TaskStoreResult<()> {
        if call == self.held {
            self.reached.notify_one();
            let permit = self
                .gate
                .acquire()
                .await
                .map_err(TaskStoreError::persistence)?;
            permit.forget();
        }
        Ok(())
    }
}

#[async_trait]
impl TaskStore for GatedTaskStore {
    async fn list_tags(&self) -> TaskStoreResult<Vec<Tag>> {
        self.inner.list_tags().await
    }

    async fn list_tasks(&self, owner: UserId) -> TaskStoreResult<Vec<Task>> {
        self.pass(Held::Listings).await?;
        self.inner.list_tasks(owner).await
    }

    async fn insert_task(&self, task: &Task) -> TaskStoreResult<()> {
        self.inner.insert_task(task).await
    }

    async fn update_fields(&self, id: TaskId, fields: &TaskFields) -> TaskStoreResult<()> {
        self.inner.update_fields(id, fields).await
    }

    async fn update_status(&self, id: TaskId, status: TaskStatus) -> TaskStoreResult<()> {
        self.pass(Held::StatusWrites).await?;
        self.inner.update_status(id, status).await
    }

    async fn update_priority(&self, id: TaskId, priority: TaskPriority) -> TaskStoreResult<()> {
        self.inner.update_priority(id, priority).await
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        self.inner.delete_task(id).await
    }

    async fn delete_links(&self, task_id: TaskId) -> TaskStoreResult<()> {
        self.inner.delete_links(task_id).await
    }

    async fn insert_links(&self, links: &[TaskTagLink]) -> TaskStoreResult<()> {
        self.inner.insert_links(links).await
    }

    async fn replace_links(
        &self,
        task_id: TaskId,
        tag_ids: &[TagId],
    ) -> Result<(), LinkReplaceError> {
        self.inner.replace_links(task_id, tag_ids).await
    }
}
