//! Configuration adapters

pub mod xdg;

pub use xdg::{default_database_path, default_recordings_dir, XdgConfigStore};
