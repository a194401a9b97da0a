//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

/// Soundboard - play instruments, record clips, replay the last recording
#[derive(Parser, Debug)]
#[command(name = "soundboard")]
#[command(version)]
#[command(about = "Terminal soundboard: play bundled instruments, record clips, replay the last recording")]
#[command(long_about = None)]
pub struct Cli {
    /// Path to the SQLite database file
    #[arg(long, value_name = "PATH", env = "SOUNDBOARD_DATABASE")]
    pub database: Option<String>,

    /// Directory where captured clips are written
    #[arg(long, value_name = "DIR", env = "SOUNDBOARD_RECORDINGS_DIR")]
    pub recordings_dir: Option<String>,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid configuration keys
pub const VALID_CONFIG_KEYS: [&str; 2] = ["database_path", "recordings_dir"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
