//! CLI layer
//!
//! Argument parsing, terminal output, signal handling, and the
//! interactive screen loop.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod screen_app;
pub mod signals;

pub use app::{run_screen, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction};
pub use presenter::Presenter;
