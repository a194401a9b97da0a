//! Soundboard CLI entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use soundboard::application::ports::ConfigStore;
use soundboard::cli::{
    app::{self, AppOptions, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use soundboard::domain::AppConfig;
use soundboard::infrastructure::config::{default_database_path, default_recordings_dir};
use soundboard::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("soundboard=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Merge config: defaults < file < cli
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());
    let cli_config = AppConfig {
        database_path: cli.database,
        recordings_dir: cli.recordings_dir,
    };
    let config = file_config.merge(cli_config);

    let options = AppOptions {
        database_path: config
            .database_path
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path),
        recordings_dir: config
            .recordings_dir
            .map(PathBuf::from)
            .unwrap_or_else(default_recordings_dir),
    };

    app::run(options).await
}
