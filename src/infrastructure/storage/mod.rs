//! Recording storage adapters

pub mod sqlite;

pub use sqlite::SqliteRecordingStore;
