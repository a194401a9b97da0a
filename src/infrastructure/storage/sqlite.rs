//! SQLite recording store adapter

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use crate::application::ports::{RecordingStore, StorageError};
use crate::domain::recording::NewRecording;

/// Schema is created once with create-if-absent semantics; there are no
/// migrations.
const CREATE_RECORDINGS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS recordings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    uri TEXT NOT NULL,
    duration INTEGER NOT NULL,
    createdAt TEXT NOT NULL
)";

/// Recording store over a local SQLite database
pub struct SqliteRecordingStore {
    pool: SqlitePool,
}

impl SqliteRecordingStore {
    /// Open (creating if missing) a file-backed database
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::OpenFailed(format!("{}: {}", parent.display(), e)))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = Self::connect(options).await?;
        debug!("SQLite database: {}", path.display());

        Ok(Self { pool })
    }

    /// Open an in-memory database (used by tests and as a degraded fallback
    /// when the file-backed store cannot be opened)
    pub async fn open_in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::new().in_memory(true);
        let pool = Self::connect(options).await?;
        Ok(Self { pool })
    }

    async fn connect(options: SqliteConnectOptions) -> Result<SqlitePool, StorageError> {
        // A single connection keeps in-memory databases coherent and is
        // plenty for an append-only single-user store.
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::OpenFailed(e.to_string()))
    }
}

#[async_trait]
impl RecordingStore for SqliteRecordingStore {
    async fn init_schema(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_RECORDINGS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::SchemaFailed(e.to_string()))?;
        Ok(())
    }

    async fn fetch_last_recording(&self) -> Result<Option<String>, StorageError> {
        sqlx::query_scalar::<_, String>(
            "SELECT uri FROM recordings ORDER BY createdAt DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::QueryFailed(e.to_string()))
    }

    async fn insert_recording(&self, recording: &NewRecording) -> Result<(), StorageError> {
        sqlx::query("INSERT INTO recordings (uri, duration, createdAt) VALUES (?, ?, ?)")
            .bind(recording.uri())
            .bind(recording.duration_secs())
            .bind(recording.created_at())
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
