//! CLI layer - argument parsing, the interactive loop, and output formatting

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;

pub use app::AppOptions;
