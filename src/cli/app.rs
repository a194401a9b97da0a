//! Interactive soundboard loop
//!
//! The terminal rendition of the soundboard surface: three instrument
//! commands, a record toggle, and a conditionally offered replay command.

use std::path::PathBuf;
use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;

use crate::application::ports::{AudioCapture, RecordingStore, SoundPlayer};
use crate::application::{Soundboard, SoundboardError, ToggleOutcome};
use crate::domain::sound::Instrument;
use crate::infrastructure::{CpalCapture, RodioPlayer, SqliteRecordingStore};

use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Resolved runtime options for the interactive app
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Path to the SQLite database file
    pub database_path: PathBuf,
    /// Directory where captured clips are written
    pub recordings_dir: PathBuf,
}

/// Run the interactive soundboard until quit, EOF, or ctrl-c
pub async fn run(options: AppOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    // Availability over visibility: if the file-backed store cannot be
    // opened, fall back to an in-memory one rather than refusing to start.
    let store = match SqliteRecordingStore::open(&options.database_path).await {
        Ok(store) => store,
        Err(e) => {
            presenter.warn(&format!(
                "Cannot open database ({}); recordings will not survive this session",
                e
            ));
            match SqliteRecordingStore::open_in_memory().await {
                Ok(store) => store,
                Err(e) => {
                    presenter.error(&format!("Cannot open storage: {}", e));
                    return ExitCode::from(EXIT_ERROR);
                }
            }
        }
    };

    let capture = CpalCapture::new(&options.recordings_dir);
    let player = RodioPlayer::new();

    let board = Soundboard::new(capture, player, store);
    board.startup().await;

    presenter.output("Welcome to Soundboard");
    print_menu(&presenter, &board).await;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => break,
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        let command = line.trim().to_lowercase();
                        if command.is_empty() {
                            continue;
                        }
                        if matches!(command.as_str(), "quit" | "exit" | "q") {
                            break;
                        }
                        handle_command(&command, &board, &mut presenter).await;
                    }
                    Ok(None) => break,
                    Err(e) => {
                        presenter.error(&format!("Failed to read input: {}", e));
                        break;
                    }
                }
            }
        }
    }

    // Stop a live capture so the clip is persisted before the store closes
    if board.is_capturing().await {
        presenter.stop_spinner();
        let _ = board.toggle_recording().await;
    }
    board.shutdown().await;

    ExitCode::from(EXIT_SUCCESS)
}

async fn handle_command<C, P, S>(
    command: &str,
    board: &Soundboard<C, P, S>,
    presenter: &mut Presenter,
) where
    C: AudioCapture,
    P: SoundPlayer,
    S: RecordingStore,
{
    match command {
        "record" | "r" => toggle_recording(board, presenter).await,
        "play" | "p" => {
            if board.play_last_recording().await {
                presenter.info("Playing last recording");
            } else {
                presenter.warn("No recording yet - type 'record' to make one");
            }
        }
        "status" => {
            presenter.info(&format!("Session: {}", board.state().await));
            match board.last_recording().await {
                Some(uri) => presenter.info(&format!("Last recording: {}", uri)),
                None => presenter.info("Last recording: none"),
            }
        }
        "help" | "?" => print_menu(presenter, board).await,
        other => match other.parse::<Instrument>() {
            Ok(instrument) => board.play_instrument(instrument).await,
            Err(e) => presenter.error(&e.to_string()),
        },
    }
}

async fn toggle_recording<C, P, S>(board: &Soundboard<C, P, S>, presenter: &mut Presenter)
where
    C: AudioCapture,
    P: SoundPlayer,
    S: RecordingStore,
{
    match board.toggle_recording().await {
        Ok(ToggleOutcome::Started) => {
            presenter.start_spinner("Recording... type 'record' to stop");
        }
        Ok(ToggleOutcome::Stopped { uri }) => {
            presenter.spinner_success(&format!("Recording saved: {}", uri));
        }
        Err(SoundboardError::PermissionDenied) => {
            presenter.stop_spinner();
            // The one error that gets a blocking, user-facing alert
            presenter.error("Permission to access the microphone is required!");
        }
        Err(e) => {
            presenter.stop_spinner();
            presenter.warn(&format!("Recording unavailable: {}", e));
        }
    }
}

async fn print_menu<C, P, S>(presenter: &Presenter, board: &Soundboard<C, P, S>)
where
    C: AudioCapture,
    P: SoundPlayer,
    S: RecordingStore,
{
    presenter.output("Commands:");
    presenter.output("  guitar | flute | piano    play an instrument");
    let record_label = if board.is_capturing().await {
        "stop recording"
    } else {
        "start recording"
    };
    presenter.output(&format!("  record                    {}", record_label));
    if board.last_recording().await.is_some() {
        presenter.output("  play                      play the last recording");
    }
    presenter.output("  status | help | quit");
}
