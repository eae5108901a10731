//! Tapedeck CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tapedeck::cli::{
    app::{load_merged_config, run_screen, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use tapedeck::domain::recording::QualityPreset;
use tapedeck::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tapedeck=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let presenter = Presenter::new();
    let cli_config = cli.to_config();

    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    let config = load_merged_config(cli_config).await;

    // Validate values that may come from a hand-edited config file
    if let Some(quality) = config.quality.as_deref() {
        if let Err(e) = quality.parse::<QualityPreset>() {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    }
    if config.keep_alive_interval_or_default() == 0 {
        presenter.error("Keep-alive interval must be at least 1 second");
        return ExitCode::from(EXIT_USAGE_ERROR);
    }

    run_screen(config).await
}
