//! Shared builders for client tests.

use crate::auth::domain::{Session, UserId};
use crate::calendar::ports::{EventStoreError, MockEventStore};
use crate::client::MutationCoordinator;
use crate::task::{
    domain::{Task, TaskFields, TaskStatus, TaskTitle},
    ports::{MockTaskStore, TaskStoreError},
};
use mockable::DefaultClock;
use std::sync::Arc;

pub(super) type MockCoordinator = MutationCoordinator<MockTaskStore, MockEventStore, DefaultClock>;

pub(super) fn backend_down() -> TaskStoreError {
    TaskStoreError::persistence(std::io::Error::other("backend unavailable"))
}

pub(super) fn events_down() -> EventStoreError {
    EventStoreError::persistence(std::io::Error::other("backend unavailable"))
}

pub(super) fn task(owner: UserId, title: &str, status: TaskStatus) -> Task {
    let fields = TaskFields::new(TaskTitle::new(title).expect("valid title"));
    let mut task = Task::new(owner, fields, &DefaultClock);
    task.set_status(status);
    task
}

pub(super) fn session(owner: UserId) -> Session {
    Session::new(owner, "ada@example.com")
}

pub(super) fn coordinator(tasks: MockTaskStore, events: MockEventStore) -> MockCoordinator {
    MutationCoordinator::new(Arc::new(tasks), Arc::new(events), Arc::new(DefaultClock))
}

/// Expects every load to return `seed` with no tags and no events.
pub(super) fn expect_loads(tasks: &mut MockTaskStore, events: &mut MockEventStore, seed: &[Task]) {
    let seed = seed.to_vec();
    tasks.expect_list_tags().returning(|| Ok(Vec::new()));
    tasks
        .expect_list_tasks()
        .returning(move |_| Ok(seed.clone()));
    events.expect_list_events().returning(|_| Ok(Vec::new()));
}

/// Expects the first load to return `seed` and every later task listing
/// to fail.
pub(super) fn expect_load_then_outage(
    tasks: &mut MockTaskStore,
    events: &mut MockEventStore,
    seed: &[Task],
) {
    let seed = seed.to_vec();
    let mut calls = 0_usize;
    tasks.expect_list_tags().returning(|| Ok(Vec::new()));
    tasks.expect_list_tasks().returning(move |_| {
        calls += 1;
        if calls == 1 {
            Ok(seed.clone())
        } else {
            Err(backend_down())
        }
    });
    events.expect_list_events().returning(|_| Ok(Vec::new()));
}

/// Signs the coordinator in as `owner` and runs the first load.
pub(super) async fn signed_in(coordinator: &MockCoordinator, owner: UserId) {
    coordinator.start_session(session(owner));
    coordinator.load().await.expect("initial load should succeed");
}
