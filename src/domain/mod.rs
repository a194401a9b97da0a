//! Domain layer - Core business logic
//!
//! Contains entities, value objects, the capture state machine, and domain
//! errors. This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod recording;
pub mod session;
pub mod sound;

// Re-export common types
pub use config::AppConfig;
pub use error::ConfigError;
pub use recording::NewRecording;
pub use session::{CaptureSession, CaptureState, InvalidStateTransition};
pub use sound::{Instrument, SoundSource};
