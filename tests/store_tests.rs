//! SQLite recording store integration tests

use soundboard::application::ports::RecordingStore;
use soundboard::domain::NewRecording;
use soundboard::infrastructure::SqliteRecordingStore;

async fn open_store() -> SqliteRecordingStore {
    let store = SqliteRecordingStore::open_in_memory()
        .await
        .expect("in-memory store");
    store.init_schema().await.expect("schema");
    store
}

fn recording(uri: &str, created_at: &str) -> NewRecording {
    NewRecording::new(uri, created_at).expect("valid recording")
}

#[tokio::test]
async fn empty_table_returns_none() {
    let store = open_store().await;

    let last = store.fetch_last_recording().await.unwrap();
    assert_eq!(last, None);
}

#[tokio::test]
async fn insert_then_fetch() {
    let store = open_store().await;

    store
        .insert_recording(&recording("/clips/a.wav", "2024-01-01T00:00:00Z"))
        .await
        .unwrap();

    let last = store.fetch_last_recording().await.unwrap();
    assert_eq!(last.as_deref(), Some("/clips/a.wav"));
}

#[tokio::test]
async fn last_recording_is_max_created_at() {
    let store = open_store().await;

    // Inserted newest-first so insertion order cannot masquerade as ordering
    store
        .insert_recording(&recording("/clips/june.wav", "2024-06-01T00:00:00Z"))
        .await
        .unwrap();
    store
        .insert_recording(&recording("/clips/january.wav", "2024-01-01T00:00:00Z"))
        .await
        .unwrap();

    let last = store.fetch_last_recording().await.unwrap();
    assert_eq!(last.as_deref(), Some("/clips/june.wav"));
}

#[tokio::test]
async fn schema_init_is_idempotent() {
    let store = open_store().await;

    store
        .insert_recording(&recording("/clips/a.wav", "2024-01-01T00:00:00Z"))
        .await
        .unwrap();

    // A second init must neither fail nor touch existing rows
    store.init_schema().await.unwrap();

    let last = store.fetch_last_recording().await.unwrap();
    assert_eq!(last.as_deref(), Some("/clips/a.wav"));
}

#[tokio::test]
async fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("soundboard.sqlite");

    {
        let store = SqliteRecordingStore::open(&db_path).await.unwrap();
        store.init_schema().await.unwrap();
        store
            .insert_recording(&recording("/clips/kept.wav", "2024-03-01T00:00:00Z"))
            .await
            .unwrap();
        store.close().await;
    }

    let store = SqliteRecordingStore::open(&db_path).await.unwrap();
    store.init_schema().await.unwrap();

    let last = store.fetch_last_recording().await.unwrap();
    assert_eq!(last.as_deref(), Some("/clips/kept.wav"));
}
