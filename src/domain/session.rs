//! Capture session state machine

use std::fmt;
use thiserror::Error;

/// Capture states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Capturing,
}

impl CaptureState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Capturing => "capturing",
        }
    }
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: CaptureState,
    pub action: String,
}

/// Capture session entity.
/// The sole authority over the single-capture rule: there is at most one live
/// capture at a time, independent of what any UI allows.
///
/// State machine:
///   IDLE -> CAPTURING (begin_capture)
///   CAPTURING -> IDLE (finish_capture)
#[derive(Debug, Default)]
pub struct CaptureSession {
    state: CaptureState,
}

impl CaptureSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Check if currently idle
    pub fn is_idle(&self) -> bool {
        self.state == CaptureState::Idle
    }

    /// Check if currently capturing
    pub fn is_capturing(&self) -> bool {
        self.state == CaptureState::Capturing
    }

    /// Transition from IDLE to CAPTURING
    pub fn begin_capture(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != CaptureState::Idle {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "begin capture".to_string(),
            });
        }
        self.state = CaptureState::Capturing;
        Ok(())
    }

    /// Transition from CAPTURING to IDLE
    pub fn finish_capture(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != CaptureState::Capturing {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "finish capture".to_string(),
            });
        }
        self.state = CaptureState::Idle;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let session = CaptureSession::new();
        assert!(session.is_idle());
        assert!(!session.is_capturing());
    }

    #[test]
    fn begin_capture_from_idle() {
        let mut session = CaptureSession::new();
        assert!(session.begin_capture().is_ok());
        assert!(session.is_capturing());
    }

    #[test]
    fn begin_capture_while_capturing_fails() {
        let mut session = CaptureSession::new();
        session.begin_capture().unwrap();

        let err = session.begin_capture().unwrap_err();
        assert_eq!(err.current_state, CaptureState::Capturing);
        assert!(err.action.contains("begin capture"));
    }

    #[test]
    fn finish_capture_from_capturing() {
        let mut session = CaptureSession::new();
        session.begin_capture().unwrap();

        assert!(session.finish_capture().is_ok());
        assert!(session.is_idle());
    }

    #[test]
    fn finish_capture_from_idle_fails() {
        let mut session = CaptureSession::new();

        let err = session.finish_capture().unwrap_err();
        assert_eq!(err.current_state, CaptureState::Idle);
    }

    #[test]
    fn states_strictly_alternate() {
        let mut session = CaptureSession::new();

        for _ in 0..3 {
            assert!(session.is_idle());
            session.begin_capture().unwrap();
            assert!(session.is_capturing());
            session.finish_capture().unwrap();
        }
        assert!(session.is_idle());
    }

    #[test]
    fn state_display() {
        assert_eq!(CaptureState::Idle.to_string(), "idle");
        assert_eq!(CaptureState::Capturing.to_string(), "capturing");
    }

    #[test]
    fn error_display() {
        let err = InvalidStateTransition {
            current_state: CaptureState::Idle,
            action: "finish capture".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("finish capture"));
        assert!(msg.contains("idle"));
    }
}
