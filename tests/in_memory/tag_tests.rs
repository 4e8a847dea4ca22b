//! In-memory integration tests for task tags.

use super::helpers::{Backend, backend, fields, sign_in};
use planboard::task::domain::TaskId;
use rstest::rstest;

fn tag_names(sync: &super::helpers::TestSync, task_id: TaskId) -> Vec<String> {
    sync.coordinator()
        .state()
        .task(task_id)
        .map(|task| task.tags().iter().map(|tag| tag.name().to_string()).collect())
        .unwrap_or_default()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_loads_with_its_tags(backend: Backend) {
    let sync = backend.session_sync();
    sign_in(&sync).await.expect("signed in");
    let home = backend.tag("home").expect("seed tag");
    let errands = backend.tag("errands").expect("seed tag");

    let task_id = sync
        .coordinator()
        .create_task(
            fields("Buy milk").expect("valid fields"),
            &[home.id(), errands.id()],
        )
        .await
        .expect("create task");

    assert_eq!(tag_names(&sync, task_id), vec!["errands", "home"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassigning_the_same_tags_keeps_one_link_each(backend: Backend) {
    let sync = backend.session_sync();
    sign_in(&sync).await.expect("signed in");
    let home = backend.tag("home").expect("seed tag");
    let errands = backend.tag("errands").expect("seed tag");
    let tag_ids = [home.id(), errands.id()];
    let task_id = sync
        .coordinator()
        .create_task(fields("Buy milk").expect("valid fields"), &tag_ids)
        .await
        .expect("create task");

    sync.coordinator()
        .edit_task(task_id, fields("Buy milk").expect("valid fields"), &tag_ids)
        .await
        .expect("edit task");

    assert_eq!(backend.tasks.links_for(task_id).expect("links").len(), 2);
    assert_eq!(tag_names(&sync, task_id), vec!["errands", "home"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn editing_replaces_the_tag_set(backend: Backend) {
    let sync = backend.session_sync();
    sign_in(&sync).await.expect("signed in");
    let home = backend.tag("home").expect("seed tag");
    let work = backend.tag("work").expect("seed tag");
    let task_id = sync
        .coordinator()
        .create_task(fields("Fix boiler").expect("valid fields"), &[home.id()])
        .await
        .expect("create task");

    sync.coordinator()
        .edit_task(
            task_id,
            fields("Fix boiler today").expect("valid fields"),
            &[work.id()],
        )
        .await
        .expect("edit task");

    let state = sync.coordinator().state();
    let task = state.task(task_id).expect("task loaded");
    assert_eq!(task.title().as_str(), "Fix boiler today");
    assert_eq!(tag_names(&sync, task_id), vec!["work"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clearing_tags_removes_every_link(backend: Backend) {
    let sync = backend.session_sync();
    sign_in(&sync).await.expect("signed in");
    let home = backend.tag("home").expect("seed tag");
    let task_id = sync
        .coordinator()
        .create_task(fields("Water plants").expect("valid fields"), &[home.id()])
        .await
        .expect("create task");

    sync.coordinator()
        .edit_task(task_id, fields("Water plants").expect("valid fields"), &[])
        .await
        .expect("edit task");

    assert!(backend.tasks.links_for(task_id).expect("links").is_empty());
    assert!(tag_names(&sync, task_id).is_empty());
}
