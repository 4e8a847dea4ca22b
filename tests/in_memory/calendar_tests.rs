//! In-memory integration tests for calendar events.

use super::helpers::{Backend, backend, sign_in};
use chrono::{TimeDelta, Utc};
use planboard::calendar::domain::EventDraft;
use planboard::client::ClientError;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upcoming_view_skips_past_events(backend: Backend) {
    let sync = backend.session_sync();
    sign_in(&sync).await.expect("signed in");
    let coordinator = sync.coordinator();
    let now = Utc::now();
    for (title, offset) in [("Dentist", 2), ("Retro", -1), ("Standup", 1)] {
        coordinator
            .create_event(EventDraft::new(title, now + TimeDelta::days(offset)))
            .await
            .expect("create event");
    }

    let upcoming: Vec<String> = coordinator
        .upcoming_events()
        .iter()
        .map(|event| event.title().as_str().to_owned())
        .collect();

    assert_eq!(upcoming, vec!["Standup", "Dentist"]);
    assert_eq!(coordinator.state().events().len(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edited_event_is_reloaded(backend: Backend) {
    let sync = backend.session_sync();
    sign_in(&sync).await.expect("signed in");
    let coordinator = sync.coordinator();
    let starts_at = Utc::now() + TimeDelta::days(3);
    let event_id = coordinator
        .create_event(EventDraft::new("Lunch", starts_at))
        .await
        .expect("create event");

    coordinator
        .edit_event(
            event_id,
            EventDraft::new("Lunch with Sam", starts_at).with_location("Canteen"),
        )
        .await
        .expect("edit event");

    let state = coordinator.state();
    let event = state.event(event_id).expect("event loaded");
    assert_eq!(event.title().as_str(), "Lunch with Sam");
    assert_eq!(event.location(), Some("Canteen"));
    assert!(state.has_entries_on(starts_at.date_naive()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_event_disappears(backend: Backend) {
    let sync = backend.session_sync();
    sign_in(&sync).await.expect("signed in");
    let coordinator = sync.coordinator();
    let event_id = coordinator
        .create_event(EventDraft::new("Gym", Utc::now() + TimeDelta::hours(5)))
        .await
        .expect("create event");

    coordinator.delete_event(event_id).await.expect("delete event");

    assert!(coordinator.state().events().is_empty());
    assert!(coordinator.upcoming_events().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_event_title_is_rejected_before_writing(backend: Backend) {
    let sync = backend.session_sync();
    sign_in(&sync).await.expect("signed in");

    let err = sync
        .coordinator()
        .create_event(EventDraft::new("  ", Utc::now()))
        .await
        .expect_err("blank title must be rejected");

    assert!(matches!(err, ClientError::InvalidEvent(_)));
    assert!(sync.coordinator().state().events().is_empty());
}
