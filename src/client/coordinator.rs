//! Remote mutations and their effect on the client state.
//!
//! Two strategies are used. Authoritative operations write remotely first
//! and refresh local state only after the backend confirms. Optimistic
//! operations (moving a card, changing a priority) update local state at
//! once and settle the remote write in the background; a failed write is
//! reconciled by reloading, or by reverting the field when the reload
//! fails too.

use super::board::{Board, DragEnd};
use super::error::{ClientError, ClientResult, FetchError, WriteError};
use super::export::{ExportError, render_task_export};
use super::state::{ClientState, Snapshot, StateChange};
use crate::auth::domain::{Session, UserId};
use crate::calendar::{
    domain::{CalendarEvent, EventDraft, EventId, upcoming_events},
    ports::EventStore,
};
use crate::document::{
    domain::{Document, DocumentUpload},
    ports::{DocumentRepository, ObjectStorage},
    services::DocumentService,
};
use crate::task::{
    domain::{TagId, Task, TaskFields, TaskId, TaskPriority, TaskStatus, TaskTagLink},
    ports::{LinkReplaceError, TaskStore},
};
use mockable::Clock;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

/// Handle to an optimistic write settling in the background.
///
/// The local change is already visible when the handle is returned.
/// Dropping the handle does not cancel the write.
#[derive(Debug)]
pub struct PendingWrite {
    handle: JoinHandle<ClientResult<()>>,
}

impl PendingWrite {
    /// Waits for the remote write and any reconciliation to finish.
    ///
    /// # Errors
    ///
    /// Returns the write failure, already recorded in the error banner, or
    /// [`ClientError::Interrupted`] when the background task did not run to
    /// completion.
    pub async fn settled(self) -> ClientResult<()> {
        self.handle.await?
    }

    /// Returns `true` once the remote write and reconciliation are done.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Optimistic field change to undo when reconciliation is impossible.
#[derive(Debug, Clone, Copy)]
enum Revert {
    Status {
        task_id: TaskId,
        previous: TaskStatus,
        optimistic: TaskStatus,
    },
    Priority {
        task_id: TaskId,
        previous: Option<TaskPriority>,
        optimistic: TaskPriority,
    },
}

/// Applies user actions to the remote stores and the shared client state.
pub struct MutationCoordinator<T, E, C>
where
    T: TaskStore + 'static,
    E: EventStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    tasks: Arc<T>,
    events: Arc<E>,
    clock: Arc<C>,
    state: Arc<RwLock<ClientState>>,
}

impl<T, E, C> Clone for MutationCoordinator<T, E, C>
where
    T: TaskStore + 'static,
    E: EventStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            events: Arc::clone(&self.events),
            clock: Arc::clone(&self.clock),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T, E, C> MutationCoordinator<T, E, C>
where
    T: TaskStore + 'static,
    E: EventStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a coordinator with an empty, signed-out state.
    #[must_use]
    pub fn new(tasks: Arc<T>, events: Arc<E>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            events,
            clock,
            state: Arc::new(RwLock::new(ClientState::new())),
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, ClientState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, ClientState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(&self, change: StateChange) {
        self.write_state().apply(change);
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn state(&self) -> ClientState {
        self.read_state().clone()
    }

    /// Returns the loaded tasks partitioned into board columns.
    #[must_use]
    pub fn board(&self) -> Board {
        Board::from_tasks(self.read_state().tasks())
    }

    /// Returns the loaded events that start now or later, earliest first.
    #[must_use]
    pub fn upcoming_events(&self) -> Vec<CalendarEvent> {
        let now = self.clock.utc();
        upcoming_events(self.read_state().events(), now)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Renders the loaded tasks as a plain-text list.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Render`] when the template fails to render.
    pub fn export_tasks(&self) -> Result<String, ExportError> {
        render_task_export(self.read_state().tasks())
    }

    /// Records a session as the active one.
    pub fn start_session(&self, session: Session) {
        debug!(user_id = %session.user_id(), "session started");
        self.apply(StateChange::SessionStarted(session));
    }

    /// Drops the session and every loaded collection.
    pub fn clear(&self) {
        debug!("client state cleared");
        self.apply(StateChange::Cleared);
    }

    /// Clears the error banner.
    pub fn dismiss_error(&self) {
        self.apply(StateChange::ErrorDismissed);
    }

    /// Logs a failure and shows it in the error banner.
    ///
    /// Returns the error so call sites can propagate it.
    #[must_use = "the reported error should be returned to the caller"]
    pub fn report_error(&self, failure: impl Into<ClientError>) -> ClientError {
        let error = failure.into();
        warn!(error = %error, "client operation failed");
        self.apply(StateChange::ErrorRaised(error.to_string()));
        error
    }

    fn signed_in_user(&self) -> Option<UserId> {
        self.read_state().session().map(Session::user_id)
    }

    fn owner(&self) -> ClientResult<UserId> {
        self.signed_in_user()
            .ok_or_else(|| self.report_error(ClientError::NotSignedIn))
    }

    async fn fetch(&self, owner: UserId) -> Result<Snapshot, FetchError> {
        let tags = self.tasks.list_tags().await.map_err(FetchError::Tags)?;
        let tasks = self
            .tasks
            .list_tasks(owner)
            .await
            .map_err(FetchError::Tasks)?;
        let events = self
            .events
            .list_events(owner)
            .await
            .map_err(FetchError::Events)?;
        Ok(Snapshot {
            tags,
            tasks,
            events,
        })
    }

    /// Reloads tags, tasks and events for the signed-in user.
    ///
    /// The three collections are replaced together. On failure they are
    /// left as they were. A snapshot that arrives after sign-out or after
    /// another user signed in is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotSignedIn`] without a session and
    /// [`ClientError::Fetch`] when any read fails.
    #[instrument(skip(self))]
    pub async fn load(&self) -> ClientResult<()> {
        let owner = self.owner()?;
        let snapshot = self
            .fetch(owner)
            .await
            .map_err(|err| self.report_error(err))?;
        let counts = (snapshot.tags.len(), snapshot.tasks.len(), snapshot.events.len());
        if self.apply_loaded(owner, snapshot) {
            let (tags, tasks, events) = counts;
            debug!(tags, tasks, events, "client state loaded");
        }
        Ok(())
    }

    /// Applies a fetched snapshot under one write lock. Returns `false` when
    /// the session changed while the fetch was running and the snapshot was
    /// dropped.
    fn apply_loaded(&self, owner: UserId, snapshot: Snapshot) -> bool {
        let mut state = self.write_state();
        let current = state.is_signed_in_as(owner);
        state.apply(StateChange::Loaded { owner, snapshot });
        if !current {
            debug!(%owner, "discarded snapshot fetched for a previous session");
        }
        current
    }

    /// Reloads without touching the banner. Used while reconciling after a
    /// failure that is already reported.
    async fn refresh(&self) -> Result<(), FetchError> {
        let Some(owner) = self.signed_in_user() else {
            return Ok(());
        };
        let snapshot = self.fetch(owner).await?;
        self.apply_loaded(owner, snapshot);
        Ok(())
    }

    async fn report_inconsistent_tags(&self, error: ClientError) -> ClientError {
        if let Err(reload) = self.refresh().await {
            warn!(error = %reload, "reload after partial tag write failed");
        }
        self.report_error(error)
    }

    /// Creates a task owned by the signed-in user, links the selected tags
    /// and reloads.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Write`] when the task row is rejected, in which
    /// case nothing changed, and [`ClientError::TagsInconsistent`] when the
    /// task was stored but its tags were not.
    #[instrument(skip(self, fields, tag_ids))]
    pub async fn create_task(
        &self,
        fields: TaskFields,
        tag_ids: &[TagId],
    ) -> ClientResult<TaskId> {
        let owner = self.owner()?;
        let task = Task::new(owner, fields, &*self.clock);
        let task_id = task.id();
        self.tasks
            .insert_task(&task)
            .await
            .map_err(|err| self.report_error(WriteError::Task(err)))?;

        let links = TaskTagLink::for_task(task_id, tag_ids);
        if !links.is_empty() {
            if let Err(source) = self.tasks.insert_links(&links).await {
                let error = ClientError::TagsInconsistent { task_id, source };
                return Err(self.report_inconsistent_tags(error).await);
            }
        }

        debug!(%task_id, "task created");
        self.load().await?;
        Ok(task_id)
    }

    /// Overwrites a task's fields and tag set, then reloads.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Write`] when a write fails without leaving
    /// partial data, and [`ClientError::TagsInconsistent`] when the old tag
    /// links were removed but the new ones were not written.
    #[instrument(skip(self, fields, tag_ids))]
    pub async fn edit_task(
        &self,
        task_id: TaskId,
        fields: TaskFields,
        tag_ids: &[TagId],
    ) -> ClientResult<()> {
        self.owner()?;
        self.tasks
            .update_fields(task_id, &fields)
            .await
            .map_err(|err| self.report_error(WriteError::Task(err)))?;

        match self.tasks.replace_links(task_id, tag_ids).await {
            Ok(()) => {}
            Err(LinkReplaceError::Unchanged(source)) => {
                return Err(self.report_error(WriteError::Links(source)));
            }
            Err(LinkReplaceError::Cleared {
                task_id: cleared,
                source,
            }) => {
                let error = ClientError::TagsInconsistent {
                    task_id: cleared,
                    source,
                };
                return Err(self.report_inconsistent_tags(error).await);
            }
        }

        debug!("task edited");
        self.load().await
    }

    /// Deletes a task remotely and then drops it from local state.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Write`] when the delete fails; the task stays
    /// in local state.
    #[instrument(skip(self))]
    pub async fn delete_task(&self, task_id: TaskId) -> ClientResult<()> {
        self.tasks
            .delete_task(task_id)
            .await
            .map_err(|err| self.report_error(WriteError::Task(err)))?;
        self.apply(StateChange::TaskRemoved(task_id));
        debug!("task deleted");
        Ok(())
    }

    /// Moves a task to another column optimistically.
    ///
    /// The new status is visible in local state when this returns. The
    /// remote write runs on the Tokio runtime, so this must be called from
    /// within one.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnknownTask`] when the task is not loaded. No
    /// remote write is issued in that case.
    pub fn move_task(&self, task_id: TaskId, status: TaskStatus) -> ClientResult<PendingWrite> {
        let previous = self
            .swap_status(task_id, status)
            .ok_or_else(|| self.report_error(ClientError::UnknownTask(task_id)))?;
        debug!(%task_id, from = %previous, to = %status, "task moved");

        let coordinator = self.clone();
        let handle = tokio::spawn(async move {
            match coordinator.tasks.update_status(task_id, status).await {
                Ok(()) => Ok(()),
                Err(err) => {
                    let revert = Revert::Status {
                        task_id,
                        previous,
                        optimistic: status,
                    };
                    Err(coordinator.reconcile(WriteError::Task(err), revert).await)
                }
            }
        });
        Ok(PendingWrite { handle })
    }

    /// Sets a task's priority optimistically.
    ///
    /// Behaves like [`MutationCoordinator::move_task`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnknownTask`] when the task is not loaded. No
    /// remote write is issued in that case.
    pub fn change_priority(
        &self,
        task_id: TaskId,
        priority: TaskPriority,
    ) -> ClientResult<PendingWrite> {
        let previous = self
            .swap_priority(task_id, priority)
            .ok_or_else(|| self.report_error(ClientError::UnknownTask(task_id)))?;
        debug!(%task_id, to = %priority, "task priority changed");

        let coordinator = self.clone();
        let handle = tokio::spawn(async move {
            match coordinator.tasks.update_priority(task_id, priority).await {
                Ok(()) => Ok(()),
                Err(err) => {
                    let revert = Revert::Priority {
                        task_id,
                        previous,
                        optimistic: priority,
                    };
                    Err(coordinator.reconcile(WriteError::Task(err), revert).await)
                }
            }
        });
        Ok(PendingWrite { handle })
    }

    /// Applies the end of a board drag.
    ///
    /// A drop on a column moves the task there, even when it is the task's
    /// current column. Drops on another card or outside the board do
    /// nothing and return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnknownTask`] when the dragged task is not
    /// loaded.
    pub fn handle_drag_end(&self, drag: DragEnd) -> ClientResult<Option<PendingWrite>> {
        drag.target_status()
            .map(|status| self.move_task(drag.task_id, status))
            .transpose()
    }

    fn swap_status(&self, task_id: TaskId, status: TaskStatus) -> Option<TaskStatus> {
        let mut state = self.write_state();
        let previous = state.task(task_id).map(Task::status)?;
        state.apply(StateChange::StatusChanged { task_id, status });
        Some(previous)
    }

    fn swap_priority(
        &self,
        task_id: TaskId,
        priority: TaskPriority,
    ) -> Option<Option<TaskPriority>> {
        let mut state = self.write_state();
        let previous = state.task(task_id).map(Task::priority)?;
        state.apply(StateChange::PriorityChanged {
            task_id,
            priority: Some(priority),
        });
        Some(previous)
    }

    async fn reconcile(&self, failure: WriteError, revert: Revert) -> ClientError {
        let error = self.report_error(failure);
        if let Err(reload) = self.refresh().await {
            warn!(error = %reload, "reload after failed write failed, reverting");
            self.revert(revert);
        }
        error
    }

    fn revert(&self, revert: Revert) {
        let mut state = self.write_state();
        match revert {
            Revert::Status {
                task_id,
                previous,
                optimistic,
            } => {
                if state.task(task_id).map(Task::status) == Some(optimistic) {
                    state.apply(StateChange::StatusChanged {
                        task_id,
                        status: previous,
                    });
                }
            }
            Revert::Priority {
                task_id,
                previous,
                optimistic,
            } => {
                if state.task(task_id).map(Task::priority) == Some(Some(optimistic)) {
                    state.apply(StateChange::PriorityChanged {
                        task_id,
                        priority: previous,
                    });
                }
            }
        }
    }

    /// Creates an event owned by the signed-in user and reloads.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEvent`] for a blank title and
    /// [`ClientError::Write`] when the backend rejects the event.
    #[instrument(skip(self, draft))]
    pub async fn create_event(&self, draft: EventDraft) -> ClientResult<EventId> {
        let owner = self.owner()?;
        let event = CalendarEvent::new(owner, draft, &*self.clock)
            .map_err(|err| self.report_error(err))?;
        self.events
            .insert_event(&event)
            .await
            .map_err(|err| self.report_error(WriteError::Event(err)))?;
        debug!(event_id = %event.id(), "event created");
        self.load().await?;
        Ok(event.id())
    }

    /// Overwrites a loaded event from a draft and reloads.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnknownEvent`] when the event is not loaded,
    /// [`ClientError::InvalidEvent`] for a blank title and
    /// [`ClientError::Write`] when the backend rejects the update.
    #[instrument(skip(self, draft))]
    pub async fn edit_event(&self, event_id: EventId, draft: EventDraft) -> ClientResult<()> {
        let current = self.read_state().event(event_id).cloned();
        let mut event =
            current.ok_or_else(|| self.report_error(ClientError::UnknownEvent(event_id)))?;
        event
            .apply_draft(draft)
            .map_err(|err| self.report_error(err))?;
        self.events
            .update_event(&event)
            .await
            .map_err(|err| self.report_error(WriteError::Event(err)))?;
        debug!("event edited");
        self.load().await
    }

    /// Deletes an event and reloads.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Write`] when the delete fails.
    #[instrument(skip(self))]
    pub async fn delete_event(&self, event_id: EventId) -> ClientResult<()> {
        self.events
            .delete_event(event_id)
            .await
            .map_err(|err| self.report_error(WriteError::Event(err)))?;
        debug!("event deleted");
        self.load().await
    }

    /// Attaches a file to a task through the document service.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotSignedIn`] without a session and
    /// [`ClientError::Document`] when the upload or its record fails.
    #[instrument(skip(self, documents, upload), fields(file = %upload.file_name()))]
    pub async fn upload_document<S, R, D>(
        &self,
        documents: &DocumentService<S, R, D>,
        task_id: TaskId,
        upload: &DocumentUpload,
    ) -> ClientResult<Document>
    where
        S: ObjectStorage,
        R: DocumentRepository,
        D: Clock + Send + Sync,
    {
        self.owner()?;
        documents
            .upload(task_id, upload)
            .await
            .map_err(|err| self.report_error(err))
    }

    /// Fetches the bytes of an attached file.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotSignedIn`] without a session and
    /// [`ClientError::Document`] when storage fails.
    #[instrument(skip(self, documents, document), fields(document_id = %document.id()))]
    pub async fn download_document<S, R, D>(
        &self,
        documents: &DocumentService<S, R, D>,
        document: &Document,
    ) -> ClientResult<Vec<u8>>
    where
        S: ObjectStorage,
        R: DocumentRepository,
        D: Clock + Send + Sync,
    {
        self.owner()?;
        documents
            .download(document)
            .await
            .map_err(|err| self.report_error(err))
    }

    /// Removes an attached file and its record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotSignedIn`] without a session and
    /// [`ClientError::Document`] when the stored file or the record cannot
    /// be removed.
    #[instrument(skip(self, documents, document), fields(document_id = %document.id()))]
    pub async fn delete_document<S, R, D>(
        &self,
        documents: &DocumentService<S, R, D>,
        document: &Document,
    ) -> ClientResult<()>
    where
        S: ObjectStorage,
        R: DocumentRepository,
        D: Clock + Send + Sync,
    {
        self.owner()?;
        documents
            .delete(document)
            .await
            .map_err(|err| self.report_error(err))
    }

    /// Lists the files attached to a task.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotSignedIn`] without a session and
    /// [`ClientError::Document`] when the listing fails.
    #[instrument(skip(self, documents))]
    pub async fn list_documents<S, R, D>(
        &self,
        documents: &DocumentService<S, R, D>,
        task_id: TaskId,
    ) -> ClientResult<Vec<Document>>
    where
        S: ObjectStorage,
        R: DocumentRepository,
        D: Clock + Send + Sync,
    {
        self.owner()?;
        documents
            .list(task_id)
            .await
            .map_err(|err| self.report_error(err))
    }
}
