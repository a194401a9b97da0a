//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with cpal, rodio, SQLite, and the filesystem.

pub mod capture;
pub mod config;
pub mod playback;
pub mod storage;

// Re-export adapters
pub use capture::CpalCapture;
pub use config::XdgConfigStore;
pub use playback::RodioPlayer;
pub use storage::SqliteRecordingStore;
