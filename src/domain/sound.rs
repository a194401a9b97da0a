//! Playable sound sources

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Bundled instruments shipped with the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    Guitar,
    Flute,
    Piano,
}

impl Instrument {
    /// All bundled instruments, in display order
    pub const ALL: [Instrument; 3] = [Self::Guitar, Self::Flute, Self::Piano];

    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Guitar => "guitar",
            Self::Flute => "flute",
            Self::Piano => "piano",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an unknown instrument name is given
#[derive(Debug, Clone, Error)]
#[error("Unknown instrument: \"{input}\". Valid instruments are: guitar, flute, piano")]
pub struct UnknownInstrumentError {
    pub input: String,
}

impl FromStr for Instrument {
    type Err = UnknownInstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guitar" => Ok(Self::Guitar),
            "flute" => Ok(Self::Flute),
            "piano" => Ok(Self::Piano),
            other => Err(UnknownInstrumentError {
                input: other.to_string(),
            }),
        }
    }
}

/// A playable audio source: either a bundled instrument or an opaque resource
/// locator for a previously captured clip.
///
/// The explicit variants keep the player's contract statically checked; no
/// runtime sniffing of "is this a path or an asset".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    Bundled(Instrument),
    Locator(String),
}

impl SoundSource {
    /// Build a locator source from an opaque uri string
    pub fn locator(uri: impl Into<String>) -> Self {
        Self::Locator(uri.into())
    }
}

impl fmt::Display for SoundSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundled(instrument) => write!(f, "bundled:{}", instrument),
            Self::Locator(uri) => write!(f, "{}", uri),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instrument_round_trip() {
        for instrument in Instrument::ALL {
            assert_eq!(instrument.as_str().parse::<Instrument>().unwrap(), instrument);
        }
    }

    #[test]
    fn unknown_instrument_is_rejected() {
        let err = "theremin".parse::<Instrument>().unwrap_err();
        assert!(err.to_string().contains("theremin"));
    }

    #[test]
    fn source_display() {
        assert_eq!(SoundSource::Bundled(Instrument::Guitar).to_string(), "bundled:guitar");
        assert_eq!(SoundSource::locator("file:///x.wav").to_string(), "file:///x.wav");
    }
}
