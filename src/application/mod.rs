//! Application layer
//!
//! Holds the recording screen use case and the port traits the
//! infrastructure adapters implement.

pub mod ports;
pub mod screen;

// Re-export the use case
pub use screen::{
    PlaybackToggle, RecordingScreenUseCase, ScreenConfig, ScreenError, StartOutcome,
    KEEP_ALIVE_TASK, PROGRESS_UPDATE_INTERVAL, STATUS_REFRESH_INTERVAL,
};
