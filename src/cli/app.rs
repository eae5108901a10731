//! Main app runner for the recording screen

use std::process::ExitCode;
use std::time::Duration;

use crate::application::ports::ConfigStore;
use crate::application::{RecordingScreenUseCase, ScreenConfig};
use crate::domain::config::AppConfig;
use crate::infrastructure::background::create_scheduler;
use crate::infrastructure::notification::create_notifier;
use crate::infrastructure::playback::create_player;
use crate::infrastructure::recording::{create_recorder, RecordingStore};
use crate::infrastructure::XdgConfigStore;

use super::presenter::Presenter;
use super::screen_app::run_screen_loop;
use super::signals::ScreenSignalHandler;

/// Process exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Run the interactive recording screen
pub async fn run_screen(config: AppConfig) -> ExitCode {
    let mut presenter = Presenter::new();

    let (mut signals, _signal_tx) = match ScreenSignalHandler::new().await {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Could not install signal handlers: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Wire adapters into the use case
    let store = match config.output_dir.as_deref() {
        Some(dir) => RecordingStore::with_dir(dir),
        None => RecordingStore::new(),
    };
    let recorder = create_recorder(store);
    let player = create_player();
    let notifier = create_notifier();
    let scheduler = create_scheduler();

    let screen_config = ScreenConfig {
        quality: config.quality_or_default(),
        live_status: config.notify_or_default(),
        keep_alive_interval: Duration::from_secs(config.keep_alive_interval_or_default()),
    };

    let screen = RecordingScreenUseCase::new(recorder, player, notifier, scheduler, screen_config);
    screen.mount().await;

    let clean = run_screen_loop(&screen, &mut signals, &mut presenter).await;

    screen.unmount().await;

    if clean {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// Load and merge configuration from file and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Merge: defaults < file < cli. TAPEDECK_OUTPUT_DIR is folded into the
    // cli layer by the argument parser.
    AppConfig::defaults().merge(file_config).merge(cli_config)
}
