//! End-to-end flow over real file-backed collaborators: upload, list,
//! preview, history persistence across restarts, delete.

use ngdrive_client::test_support::RecordingShell;
use ngdrive_client::{FileActionDispatcher, FileKvStore, ListingCache, RecencyTracker};
use ngdrive_core::{Category, UploadCandidate};
use ngdrive_storage::{LocalStore, ObjectStore};
use std::sync::Arc;

struct Env {
    _dir: tempfile::TempDir,
    store: Arc<LocalStore>,
    kv_path: std::path::PathBuf,
}

async fn env() -> Env {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(
        LocalStore::new(
            dir.path().join("files"),
            "http://localhost:3000/files".to_string(),
        )
        .await
        .unwrap(),
    );
    let kv_path = dir.path().join("history.json");
    Env {
        _dir: dir,
        store,
        kv_path,
    }
}

fn dispatcher(env: &Env, shell: Arc<RecordingShell>) -> FileActionDispatcher {
    let store: Arc<dyn ObjectStore> = env.store.clone();
    let listing = Arc::new(ListingCache::new(store.clone()));
    let history = Arc::new(RecencyTracker::load(Arc::new(FileKvStore::new(
        &env.kv_path,
    ))));
    FileActionDispatcher::new(store, listing, history, shell)
}

#[tokio::test]
async fn test_full_file_management_flow() {
    let env = env().await;
    let shell = Arc::new(RecordingShell::confirming());
    let dispatcher = dispatcher(&env, shell.clone());

    // Upload three files through the candidate slot.
    for (name, bytes) in [
        ("quarterly.pdf", b"pdf".to_vec()),
        ("summary.docx", b"docx".to_vec()),
        ("archive.zip", b"zip".to_vec()),
    ] {
        dispatcher.set_candidate(UploadCandidate::new(name, "application/octet-stream", bytes));
        dispatcher.upload().await.unwrap();
    }

    // The refresh after the last upload left a complete snapshot.
    let listing = env.store.list("", &Default::default()).await.unwrap();
    assert_eq!(listing.len(), 3);

    // Tab + search filtering over the snapshot.
    let pdfs: Vec<String> = {
        let store: Arc<dyn ObjectStore> = env.store.clone();
        let cache = ListingCache::new(store);
        cache.refresh().await.unwrap();
        cache
            .visible(Category::Pdf, "quart")
            .into_iter()
            .map(|o| o.name)
            .collect()
    };
    assert_eq!(pdfs, vec!["quarterly.pdf"]);

    // Preview a direct format and a viewer format.
    dispatcher.preview("quarterly.pdf").await.unwrap();
    dispatcher.preview("summary.docx").await.unwrap();
    assert_eq!(shell.opened_urls().len(), 2);
    assert!(shell.opened_urls()[1].starts_with("https://docs.google.com/viewer?url="));

    // Delete with confirmation.
    dispatcher.delete("archive.zip").await.unwrap();
    assert_eq!(
        env.store.list("", &Default::default()).await.unwrap().len(),
        2
    );
}

#[tokio::test]
async fn test_history_survives_restart() {
    let env = env().await;
    let shell = Arc::new(RecordingShell::confirming());

    {
        let dispatcher = dispatcher(&env, shell.clone());
        dispatcher.set_candidate(UploadCandidate::new("a.pdf", "application/pdf", vec![1]));
        dispatcher.upload().await.unwrap();
        dispatcher.preview("a.pdf").await.unwrap();
    }

    // A fresh tracker over the same file sees the entry.
    let tracker = RecencyTracker::load(Arc::new(FileKvStore::new(&env.kv_path)));
    let entries = tracker.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].file_name, "a.pdf");
}
