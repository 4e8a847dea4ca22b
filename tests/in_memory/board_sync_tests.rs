//! In-memory integration tests for board moves and priorities.

use std::sync::Arc;

use super::helpers::{Backend, GatedTaskStore, backend, fields, sign_in, stored_status};
use mockable::DefaultClock;
use planboard::{
    auth::domain::{Session, UserId},
    calendar::adapters::memory::InMemoryEventStore,
    client::{DragEnd, DropTarget, MutationCoordinator},
    task::domain::{TaskPriority, TaskStatus},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moved_card_shows_before_the_remote_write_lands(backend: Backend) {
    let gated = Arc::new(GatedTaskStore::new(Arc::clone(&backend.tasks)));
    let coordinator = MutationCoordinator::new(
        Arc::clone(&gated),
        Arc::new(InMemoryEventStore::new()),
        Arc::new(DefaultClock),
    );
    let session = Session::new(UserId::new(), "ada@example.com");
    let owner = session.user_id();
    coordinator.start_session(session);
    let task_id = coordinator
        .create_task(fields("Write report").expect("valid fields"), &[])
        .await
        .expect("create task");

    let pending = coordinator
        .move_task(task_id, TaskStatus::Done)
        .expect("task is loaded");

    assert_eq!(coordinator.board().column(TaskStatus::Done).len(), 1);
    assert!(coordinator.board().column(TaskStatus::Todo).is_empty());
    assert_eq!(
        stored_status(&*backend.tasks, owner, task_id)
            .await
            .expect("stored task"),
        TaskStatus::Todo
    );
    assert!(!pending.is_settled());

    gated.release();
    pending.settled().await.expect("remote write succeeds");

    assert_eq!(
        stored_status(&*backend.tasks, owner, task_id)
            .await
            .expect("stored task"),
        TaskStatus::Done
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn column_drop_is_persisted(backend: Backend) {
    let sync = backend.session_sync();
    let owner = sign_in(&sync).await.expect("signed in");
    let coordinator = sync.coordinator();
    let task_id = coordinator
        .create_task(fields("Book flights").expect("valid fields"), &[])
        .await
        .expect("create task");
    let over = DropTarget::parse_column("IN_PROGRESS").expect("known column");

    let pending = coordinator
        .handle_drag_end(DragEnd::new(task_id, Some(over)))
        .expect("task is loaded")
        .expect("column drop writes");
    pending.settled().await.expect("remote write succeeds");

    assert_eq!(
        stored_status(&*backend.tasks, owner, task_id)
            .await
            .expect("stored task"),
        TaskStatus::InProgress
    );
    coordinator.load().await.expect("reload");
    let board = coordinator.board();
    assert_eq!(board.column(TaskStatus::InProgress).len(), 1);
    assert_eq!(board.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn priority_change_survives_a_reload(backend: Backend) {
    let sync = backend.session_sync();
    sign_in(&sync).await.expect("signed in");
    let coordinator = sync.coordinator();
    let task_id = coordinator
        .create_task(fields("Renew passport").expect("valid fields"), &[])
        .await
        .expect("create task");

    coordinator
        .change_priority(task_id, TaskPriority::High)
        .expect("task is loaded")
        .settled()
        .await
        .expect("remote write succeeds");
    coordinator.load().await.expect("reload");

    let state = coordinator.state();
    let task = state.task(task_id).expect("task loaded");
    assert_eq!(task.priority(), Some(TaskPriority::High));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_leaves_board_and_store(backend: Backend) {
    let sync = backend.session_sync();
    let owner = sign_in(&sync).await.expect("signed in");
    let coordinator = sync.coordinator();
    let task_id = coordinator
        .create_task(fields("Cancel gym").expect("valid fields"), &[])
        .await
        .expect("create task");

    coordinator.delete_task(task_id).await.expect("delete task");

    assert!(coordinator.board().is_empty());
    assert!(stored_status(&*backend.tasks, owner, task_id).await.is_err());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn undated_tasks_follow_dated_ones(backend: Backend) {
    let sync = backend.session_sync();
    sign_in(&sync).await.expect("signed in");
    let coordinator = sync.coordinator();
    let due = chrono::NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
    coordinator
        .create_task(fields("Someday").expect("valid fields"), &[])
        .await
        .expect("create undated task");
    coordinator
        .create_task(
            fields("Tax return").expect("valid fields").with_due_date(due),
            &[],
        )
        .await
        .expect("create dated task");

    let titles: Vec<String> = coordinator
        .board()
        .column(TaskStatus::Todo)
        .iter()
        .map(|task| task.title().to_string())
        .collect();

    assert_eq!(titles, vec!["Tax return", "Someday"]);
}
