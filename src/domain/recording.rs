//! Recording entity

use thiserror::Error;

/// Duration persisted for every clip. The capture path never measures real
/// duration, so rows carry the "unknown" sentinel.
pub const UNKNOWN_DURATION_SECS: i64 = 0;

/// Error when constructing a recording with invalid fields
#[derive(Debug, Clone, Error)]
#[error("Recording uri must not be empty")]
pub struct EmptyUriError;

/// A recording to be persisted: everything except the surrogate key, which
/// the store assigns.
///
/// Rows are append-only; once persisted a recording is never updated or
/// deleted. The non-empty uri invariant is enforced here so no adapter can
/// persist a row without a locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecording {
    uri: String,
    duration_secs: i64,
    created_at: String,
}

impl NewRecording {
    /// Create an insert form for a clip captured at `created_at` (RFC 3339).
    pub fn new(uri: impl Into<String>, created_at: impl Into<String>) -> Result<Self, EmptyUriError> {
        let uri = uri.into();
        if uri.is_empty() {
            return Err(EmptyUriError);
        }
        Ok(Self {
            uri,
            duration_secs: UNKNOWN_DURATION_SECS,
            created_at: created_at.into(),
        })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn duration_secs(&self) -> i64 {
        self.duration_secs
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_recording_keeps_fields() {
        let rec = NewRecording::new("/tmp/clip-1.wav", "2024-01-01T00:00:00Z").unwrap();
        assert_eq!(rec.uri(), "/tmp/clip-1.wav");
        assert_eq!(rec.created_at(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn duration_is_unknown_sentinel() {
        let rec = NewRecording::new("file:///x.wav", "2024-01-01T00:00:00Z").unwrap();
        assert_eq!(rec.duration_secs(), UNKNOWN_DURATION_SECS);
    }

    #[test]
    fn empty_uri_is_rejected() {
        assert!(NewRecording::new("", "2024-01-01T00:00:00Z").is_err());
    }
}
