//! In-memory integration tests for sign-in and sign-out.

use std::sync::Arc;

use super::helpers::{Backend, GatedTaskStore, Held, backend, credentials, fields, sign_in};
use mockable::DefaultClock;
use planboard::{
    auth::domain::{Session, UserId},
    calendar::adapters::memory::InMemoryEventStore,
    client::{ClientError, MutationCoordinator},
    task::{domain::Task, ports::TaskStore},
};
use rstest::rstest;

type GatedCoordinator = MutationCoordinator<GatedTaskStore, InMemoryEventStore, DefaultClock>;

/// Signs a user in over a store whose listings wait for a release.
async fn held_listing(backend: &Backend) -> (Arc<GatedTaskStore>, GatedCoordinator) {
    let gated = Arc::new(GatedTaskStore::holding(
        Arc::clone(&backend.tasks),
        Held::Listings,
    ));
    let coordinator = MutationCoordinator::new(
        Arc::clone(&gated),
        Arc::new(InMemoryEventStore::new()),
        Arc::new(DefaultClock),
    );
    let session = Session::new(UserId::new(), "ada@example.com");
    let task = Task::new(
        session.user_id(),
        fields("Stale").expect("valid fields"),
        &DefaultClock,
    );
    backend.tasks.insert_task(&task).await.expect("seed task");
    coordinator.start_session(session);
    (gated, coordinator)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sign_out_clears_and_sign_in_restores(backend: Backend) {
    let sync = backend.session_sync();
    sign_in(&sync).await.expect("signed in");
    sync.coordinator()
        .create_task(fields("Call mum").expect("valid fields"), &[])
        .await
        .expect("create task");

    sync.sign_out().await.expect("sign out");
    let cleared = sync.coordinator().state();
    assert!(cleared.session().is_none());
    assert!(cleared.tasks().is_empty());

    sync.sign_in(&credentials().expect("valid credentials"))
        .await
        .expect("sign in again");
    assert_eq!(sync.coordinator().state().tasks().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn users_only_see_their_own_tasks(backend: Backend) {
    let first = backend.session_sync();
    sign_in(&first).await.expect("signed in");
    first
        .coordinator()
        .create_task(fields("Private").expect("valid fields"), &[])
        .await
        .expect("create task");

    let second = backend.session_sync();
    let other = planboard::auth::domain::Credentials::new("bob@example.com", "hunter2")
        .expect("valid credentials");
    second.sign_up(&other).await.expect("sign up");
    second.sign_in(&other).await.expect("sign in");

    assert!(second.coordinator().state().tasks().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn writes_without_a_session_are_refused(backend: Backend) {
    let sync = backend.session_sync();

    let err = sync
        .coordinator()
        .create_task(fields("Orphan").expect("valid fields"), &[])
        .await
        .expect_err("no session");

    assert!(matches!(err, ClientError::NotSignedIn));
    assert_eq!(sync.coordinator().state().last_error(), Some("not signed in"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn load_finishing_after_sign_out_leaves_state_empty(backend: Backend) {
    let (gated, coordinator) = held_listing(&backend).await;
    let loading = tokio::spawn({
        let background = coordinator.clone();
        async move { background.load().await }
    });
    gated.reached().await;

    coordinator.clear();
    gated.release();
    loading.await.expect("load task").expect("load succeeds");

    let state = coordinator.state();
    assert!(state.session().is_none());
    assert!(state.tasks().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn load_finishing_after_account_switch_is_dropped(backend: Backend) {
    let (gated, coordinator) = held_listing(&backend).await;
    let loading = tokio::spawn({
        let background = coordinator.clone();
        async move { background.load().await }
    });
    gated.reached().await;

    let other = Session::new(UserId::new(), "bob@example.com");
    let other_id = other.user_id();
    coordinator.start_session(other);
    gated.release();
    loading.await.expect("load task").expect("load succeeds");

    let state = coordinator.state();
    assert_eq!(state.session().map(Session::user_id), Some(other_id));
    assert!(state.tasks().is_empty());
}
