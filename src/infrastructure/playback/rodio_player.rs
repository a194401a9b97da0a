//! Rodio-based sound player
//!
//! Bundled instruments are short synthesized jingles compiled into the
//! binary; captured clips are decoded from disk. Playback runs detached on a
//! blocking task so calls return once playback is initiated and overlapping
//! plays are possible.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, Sink};
use tracing::{debug, warn};

use crate::application::ports::{PlaybackError, SoundPlayer};
use crate::domain::sound::{Instrument, SoundSource};

const AMPLITUDE: f32 = 0.3;

/// Sound player implementation using rodio
pub struct RodioPlayer;

impl RodioPlayer {
    /// Create a new rodio-based player
    pub fn new() -> Self {
        Self
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// A source resolved and validated, ready to hand to the playback thread
enum Prepared {
    Instrument(Instrument),
    File(PathBuf),
}

#[async_trait]
impl SoundPlayer for RodioPlayer {
    async fn play(&self, source: &SoundSource) -> Result<(), PlaybackError> {
        let prepared = match source {
            SoundSource::Bundled(instrument) => Prepared::Instrument(*instrument),
            SoundSource::Locator(uri) => {
                let path = resolve_locator(uri);
                tokio::fs::metadata(&path).await.map_err(|e| {
                    PlaybackError::LoadFailed(format!("{}: {}", path.display(), e))
                })?;
                Prepared::File(path)
            }
        };

        debug!("Playing {}", source);

        // Detached: playback runs to completion in the background and a late
        // failure is logged rather than returned.
        tokio::task::spawn_blocking(move || {
            if let Err(e) = play_prepared(prepared) {
                warn!("Playback failed: {}", e);
            }
        });

        Ok(())
    }
}

/// Map an opaque locator onto a filesystem path
fn resolve_locator(uri: &str) -> PathBuf {
    PathBuf::from(uri.strip_prefix("file://").unwrap_or(uri))
}

/// Per-instrument jingle as (frequency Hz, length ms) note sequences
const fn instrument_notes(instrument: Instrument) -> &'static [(f32, u64)] {
    match instrument {
        // Plucked ascending E major arpeggio
        Instrument::Guitar => &[(164.81, 110), (246.94, 110), (329.63, 110), (415.30, 160)],
        // Airy high register run
        Instrument::Flute => &[(783.99, 180), (987.77, 180), (1174.66, 260)],
        // C major chord rolled upwards
        Instrument::Piano => &[(261.63, 140), (329.63, 140), (392.00, 140), (523.25, 220)],
    }
}

/// Sine note with a short fade-in so transitions do not click
fn note(freq: f32, length_ms: u64, amplitude: f32) -> impl Source<Item = f32> + Send {
    let fade_ms = (length_ms / 5).min(30);
    SineWave::new(freq)
        .take_duration(Duration::from_millis(length_ms))
        .fade_in(Duration::from_millis(fade_ms))
        .amplify(amplitude)
}

/// Play a prepared source to completion (called from spawn_blocking)
fn play_prepared(prepared: Prepared) -> Result<(), PlaybackError> {
    let (_stream, stream_handle) = OutputStream::try_default()
        .map_err(|e| PlaybackError::DeviceNotAvailable(e.to_string()))?;

    let sink = Sink::try_new(&stream_handle)
        .map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;

    match prepared {
        Prepared::Instrument(instrument) => {
            for &(freq, length_ms) in instrument_notes(instrument) {
                sink.append(note(freq, length_ms, AMPLITUDE));
            }
        }
        Prepared::File(path) => {
            sink.append(open_clip(&path)?);
        }
    }

    sink.sleep_until_end();

    Ok(())
}

fn open_clip(path: &Path) -> Result<Decoder<BufReader<File>>, PlaybackError> {
    let file = File::open(path)
        .map_err(|e| PlaybackError::LoadFailed(format!("{}: {}", path.display(), e)))?;
    Decoder::new(BufReader::new(file))
        .map_err(|e| PlaybackError::DecodeFailed(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_with_file_scheme_is_stripped() {
        assert_eq!(resolve_locator("file:///tmp/x.wav"), PathBuf::from("/tmp/x.wav"));
    }

    #[test]
    fn plain_path_locator_is_kept() {
        assert_eq!(resolve_locator("/tmp/x.wav"), PathBuf::from("/tmp/x.wav"));
    }

    #[test]
    fn every_instrument_has_a_jingle() {
        for instrument in Instrument::ALL {
            assert!(!instrument_notes(instrument).is_empty());
        }
    }

    #[tokio::test]
    async fn missing_clip_fails_to_load() {
        let player = RodioPlayer::new();
        let source = SoundSource::locator("file:///nonexistent/clip.wav");

        let err = player.play(&source).await.unwrap_err();
        assert!(matches!(err, PlaybackError::LoadFailed(_)));
    }
}
