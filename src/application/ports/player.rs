//! Sound playback port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::sound::SoundSource;

/// Errors that can occur when loading or playing a sound
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("Failed to load audio resource: {0}")]
    LoadFailed(String),

    #[error("Failed to decode audio resource: {0}")]
    DecodeFailed(String),

    #[error("Audio device not available: {0}")]
    DeviceNotAvailable(String),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}

/// Port for sound playback.
///
/// Each call is independent: no shared playback state, no queueing, and no
/// interruption of a prior in-flight playback. `play` returns once playback
/// has been initiated; overlapping plays are accepted behavior.
#[async_trait]
pub trait SoundPlayer: Send + Sync {
    /// Load the resource behind `source` and start playing it.
    async fn play(&self, source: &SoundSource) -> Result<(), PlaybackError>;
}
