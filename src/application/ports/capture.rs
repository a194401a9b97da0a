//! Audio capture port interface

use async_trait::async_trait;
use thiserror::Error;

/// Outcome of a microphone permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Capture errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Failed to configure capture: {0}")]
    ConfigurationFailed(String),

    #[error("Failed to start capture: {0}")]
    StartFailed(String),

    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    #[error("A capture is already in progress")]
    AlreadyCapturing,

    #[error("No capture in progress")]
    NotCapturing,

    #[error("No audio input device available")]
    NoInputDevice,
}

/// Port for microphone capture.
///
/// An adapter holds at most one live capture handle. `start` while a capture
/// is live fails with [`CaptureError::AlreadyCapturing`]; `stop` without one
/// fails with [`CaptureError::NotCapturing`].
#[async_trait]
pub trait AudioCapture: Send + Sync {
    /// Ask for microphone permission.
    ///
    /// # Returns
    /// Granted or denied. Denial is not an error; it is a normal answer the
    /// caller surfaces to the user.
    async fn request_permission(&self) -> Result<PermissionStatus, CaptureError>;

    /// Configure the input device and begin buffering audio.
    ///
    /// Any failure leaves no live capture behind.
    async fn start(&self) -> Result<(), CaptureError>;

    /// Finalize and release the capture.
    ///
    /// # Returns
    /// The resource locator (uri) of the captured clip.
    async fn stop(&self) -> Result<String, CaptureError>;

    /// Check if a capture is currently live
    fn is_capturing(&self) -> bool;
}
