//! Soundboard - terminal soundboard with recording
//!
//! This crate plays a fixed set of bundled instrument sounds, records audio
//! clips from the default microphone, and keeps recording metadata in a local
//! SQLite database so the most recent clip can be replayed across runs.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core entities, the capture state machine, and domain errors
//! - **Application**: The soundboard use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, rodio, SQLite, XDG config)
//! - **CLI**: Command-line interface and the interactive command loop

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
