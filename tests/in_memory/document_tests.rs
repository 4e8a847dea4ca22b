//! In-memory integration tests for task attachments.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use mockable::DefaultClock;
use planboard::{
    config::ClientConfig,
    document::{
        adapters::memory::{InMemoryDocumentRepository, InMemoryObjectStorage},
        domain::{DOCUMENT_VERSION, DocumentUpload, FileName},
        services::DocumentService,
    },
    task::domain::TaskId,
};
use rstest::{fixture, rstest};

type TestService =
    DocumentService<InMemoryObjectStorage, InMemoryDocumentRepository, DefaultClock>;

struct Harness {
    storage: Arc<InMemoryObjectStorage>,
    service: TestService,
}

#[fixture]
fn harness() -> Harness {
    let config = ClientConfig::from_toml_str("").expect("default configuration");
    let storage = Arc::new(InMemoryObjectStorage::new());
    let service = DocumentService::new(
        Arc::clone(&storage),
        Arc::new(InMemoryDocumentRepository::new()),
        Arc::new(DefaultClock),
        config.storage.documents_bucket,
    );
    Harness { storage, service }
}

fn upload(name: &str, bytes: &[u8]) -> DocumentUpload {
    DocumentUpload::new(
        FileName::new(name).expect("valid file name"),
        "text/plain",
        bytes.to_vec(),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn uploaded_file_can_be_listed_and_downloaded(harness: Harness) {
    let task_id = TaskId::new();

    let document = harness
        .service
        .upload(task_id, &upload("notes.txt", b"pick up keys"))
        .await
        .expect("upload");

    let listed = harness.service.list(task_id).await.expect("list");
    assert_eq!(listed, vec![document.clone()]);
    assert_eq!(document.version(), DOCUMENT_VERSION);
    assert_eq!(document.size(), 12);
    assert!(
        document
            .storage_key()
            .as_str()
            .starts_with(&format!("task-{task_id}/"))
    );
    let bytes = harness.service.download(&document).await.expect("download");
    assert_eq!(bytes, b"pick up keys");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_removes_object_and_record(harness: Harness) {
    let task_id = TaskId::new();
    let document = harness
        .service
        .upload(task_id, &upload("receipt.txt", b"42.00"))
        .await
        .expect("upload");

    harness.service.delete(&document).await.expect("delete");

    assert!(harness.service.list(task_id).await.expect("list").is_empty());
    assert!(
        !harness
            .storage
            .contains(harness.service.bucket(), document.storage_key())
            .expect("storage readable")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn attachments_are_scoped_to_their_task(harness: Harness) {
    let first = TaskId::new();
    let second = TaskId::new();
    harness
        .service
        .upload(first, &upload("a.txt", b"a"))
        .await
        .expect("upload");
    harness
        .service
        .upload(second, &upload("b.txt", b"b"))
        .await
        .expect("upload");

    let listed = harness.service.list(first).await.expect("list");

    assert_eq!(listed.len(), 1);
    assert!(listed.iter().all(|document| document.task_id() == first));
    assert_eq!(harness.storage.object_count().expect("count"), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn file_read_from_a_directory_is_uploaded(harness: Harness) {
    let temp = tempfile::tempdir().expect("create temp dir");
    let path = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("utf-8 temp path");
    let dir = Dir::open_ambient_dir(&path, ambient_authority()).expect("open temp dir");
    dir.write("plan.md", "# Plan").expect("write fixture");
    let from_disk =
        DocumentUpload::from_dir(&dir, Utf8Path::new("plan.md"), "").expect("read upload");

    let document = harness
        .service
        .upload(TaskId::new(), &from_disk)
        .await
        .expect("upload");

    assert_eq!(document.file_name().as_str(), "plan.md");
    assert_eq!(document.media_type(), "application/octet-stream");
    assert_eq!(
        harness.service.download(&document).await.expect("download"),
        b"# Plan"
    );
}
