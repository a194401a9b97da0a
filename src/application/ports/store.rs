//! Recording storage port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::NewRecording;

/// Storage errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Failed to open database: {0}")]
    OpenFailed(String),

    #[error("Failed to create schema: {0}")]
    SchemaFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

/// Port for recording metadata storage.
///
/// Recordings are append-only; there is no update or delete operation.
#[async_trait]
pub trait RecordingStore: Send + Sync {
    /// Idempotently ensure the recordings table exists.
    async fn init_schema(&self) -> Result<(), StorageError>;

    /// Fetch the uri of the recording with the maximum `createdAt`.
    ///
    /// # Returns
    /// `None` when no rows exist; an empty table is a normal result, not an
    /// error. Ties on `createdAt` are broken arbitrarily.
    async fn fetch_last_recording(&self) -> Result<Option<String>, StorageError>;

    /// Append one recording row.
    async fn insert_recording(&self, recording: &NewRecording) -> Result<(), StorageError>;

    /// Release the underlying store. Called once at shutdown.
    async fn close(&self);
}
