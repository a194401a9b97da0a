//! Soundboard use case
//!
//! Wires user intents (play an instrument, toggle recording, replay the last
//! clip) to the capture, playback, and storage ports, and keeps the
//! last-recording locator in sync with persisted state.

use chrono::{SecondsFormat, Utc};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::domain::recording::NewRecording;
use crate::domain::session::{CaptureSession, CaptureState, InvalidStateTransition};
use crate::domain::sound::{Instrument, SoundSource};

use super::ports::{AudioCapture, CaptureError, PermissionStatus, RecordingStore, SoundPlayer};

/// Errors from the soundboard use case that a UI must react to.
///
/// Everything else (storage failures, playback failures) is logged at the
/// point of occurrence and degraded; availability wins over error visibility.
#[derive(Debug, Error)]
pub enum SoundboardError {
    #[error("Microphone permission is required to record")]
    PermissionDenied,

    #[error("Capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("Invalid state transition: {0}")]
    InvalidState(#[from] InvalidStateTransition),
}

/// Result of a toggle: what the session just did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A capture was started
    Started,
    /// The live capture was stopped, yielding the clip's locator
    Stopped { uri: String },
}

/// The soundboard controller, generic over its three ports.
///
/// Constructed once at startup with explicitly injected adapters; the store
/// lifecycle is open-at-launch, close-at-shutdown. All operations run on one
/// logical thread of control; the mutexes around the session machine and the
/// locator cache satisfy the `Sync` bounds.
pub struct Soundboard<C, P, S>
where
    C: AudioCapture,
    P: SoundPlayer,
    S: RecordingStore,
{
    capture: C,
    player: P,
    store: S,
    session: Mutex<CaptureSession>,
    last_recording: Mutex<Option<String>>,
}

impl<C, P, S> Soundboard<C, P, S>
where
    C: AudioCapture,
    P: SoundPlayer,
    S: RecordingStore,
{
    /// Create a new soundboard with injected adapters
    pub fn new(capture: C, player: P, store: S) -> Self {
        Self {
            capture,
            player,
            store,
            session: Mutex::new(CaptureSession::new()),
            last_recording: Mutex::new(None),
        }
    }

    /// Initialize storage and warm the last-recording cache.
    ///
    /// Neither a schema failure nor a fetch failure is fatal; both degrade
    /// the respective feature and are logged.
    pub async fn startup(&self) {
        if let Err(e) = self.store.init_schema().await {
            warn!("Schema initialization failed, storage may be unavailable: {}", e);
        }

        match self.store.fetch_last_recording().await {
            Ok(Some(uri)) => {
                info!("Restored last recording: {}", uri);
                *self.last_recording.lock().await = Some(uri);
            }
            Ok(None) => debug!("No previous recordings"),
            Err(e) => warn!("Could not fetch last recording: {}", e),
        }
    }

    /// Current session state
    pub async fn state(&self) -> CaptureState {
        self.session.lock().await.state()
    }

    /// Check if a capture is live
    pub async fn is_capturing(&self) -> bool {
        self.session.lock().await.is_capturing()
    }

    /// The last known recording locator, if any
    pub async fn last_recording(&self) -> Option<String> {
        self.last_recording.lock().await.clone()
    }

    /// Toggle recording: start a capture when idle, stop and persist when
    /// capturing. The session machine strictly alternates between the two.
    pub async fn toggle_recording(&self) -> Result<ToggleOutcome, SoundboardError> {
        let capturing = self.session.lock().await.is_capturing();
        if capturing {
            self.stop_and_persist().await
        } else {
            self.start_capture().await
        }
    }

    /// Play a bundled instrument. Playback failures are logged, never
    /// propagated.
    pub async fn play_instrument(&self, instrument: Instrument) {
        let source = SoundSource::Bundled(instrument);
        if let Err(e) = self.player.play(&source).await {
            warn!("Could not play {}: {}", instrument, e);
        }
    }

    /// Play the most recent recording, if one is known.
    ///
    /// # Returns
    /// `false` when no locator is known (the operation is a no-op).
    pub async fn play_last_recording(&self) -> bool {
        let Some(uri) = self.last_recording().await else {
            debug!("No last recording to play");
            return false;
        };

        let source = SoundSource::locator(uri);
        if let Err(e) = self.player.play(&source).await {
            warn!("Could not play last recording: {}", e);
        }
        true
    }

    /// Release the store. Called once at shutdown.
    pub async fn shutdown(&self) {
        self.store.close().await;
    }

    async fn start_capture(&self) -> Result<ToggleOutcome, SoundboardError> {
        match self.capture.request_permission().await {
            Ok(PermissionStatus::Granted) => {}
            Ok(PermissionStatus::Denied) => {
                warn!("Microphone permission denied");
                return Err(SoundboardError::PermissionDenied);
            }
            Err(e) => {
                error!("Permission request failed: {}", e);
                return Err(SoundboardError::Capture(e));
            }
        }

        self.session.lock().await.begin_capture()?;

        if let Err(e) = self.capture.start().await {
            error!("Failed to start capture: {}", e);
            // Roll the machine back so the session stays idle
            let _ = self.session.lock().await.finish_capture();
            return Err(SoundboardError::Capture(e));
        }

        info!("Capture started");
        Ok(ToggleOutcome::Started)
    }

    async fn stop_and_persist(&self) -> Result<ToggleOutcome, SoundboardError> {
        self.session.lock().await.finish_capture()?;

        let uri = self.capture.stop().await.map_err(|e| {
            error!("Failed to stop capture: {}", e);
            SoundboardError::Capture(e)
        })?;

        // The locator is in hand before the persistence call is issued.
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        match NewRecording::new(uri.clone(), created_at) {
            Ok(recording) => {
                if let Err(e) = self.store.insert_recording(&recording).await {
                    warn!("Recording left unpersisted: {}", e);
                }
            }
            Err(e) => warn!("Recording not persisted: {}", e),
        }

        *self.last_recording.lock().await = Some(uri.clone());

        info!("Capture stopped: {}", uri);
        Ok(ToggleOutcome::Stopped { uri })
    }
}
