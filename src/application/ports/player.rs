//! Playback port interface

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, Error)]
pub enum PlayerError {
    #[error("Failed to load audio file: {0}")]
    LoadFailed(String),

    #[error("No audio output device available")]
    NoOutputDevice,

    #[error("No audio file loaded")]
    NotLoaded,

    #[error("Playback error: {0}")]
    PlaybackFailed(String),
}

/// Options for loading a file into the player
#[derive(Debug, Clone)]
pub struct PlaybackOptions {
    /// How often the status callback is invoked
    pub progress_interval: Duration,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            progress_interval: Duration::from_millis(100),
        }
    }
}

/// A point-in-time view of playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackStatus {
    /// Current position in milliseconds
    pub position_ms: u64,
    /// Total duration of the loaded file in milliseconds
    pub duration_ms: u64,
    /// Whether audio is currently being rendered
    pub is_playing: bool,
    /// True on the single tick where playback reached the end of the file
    pub did_just_finish: bool,
}

/// Callback receiving playback status at the configured progress interval.
/// Invoked from the playback thread.
pub type StatusCallback = Arc<dyn Fn(PlaybackStatus) + Send + Sync>;

/// Port for playing back a finished recording
#[async_trait]
pub trait Player: Send + Sync {
    /// Load an audio file without starting playback.
    ///
    /// Replaces any previously loaded file. The callback is invoked with a
    /// fresh status every `options.progress_interval` until unload.
    async fn load(
        &self,
        path: &Path,
        options: &PlaybackOptions,
        on_status: StatusCallback,
    ) -> Result<(), PlayerError>;

    /// Start or resume playback. After the file has played to the end this
    /// restarts from position zero, which fails if the file can no longer
    /// be opened.
    async fn play(&self) -> Result<(), PlayerError>;

    /// Pause playback, keeping the current position.
    async fn pause(&self) -> Result<(), PlayerError>;

    /// Jump to a position in milliseconds.
    async fn seek_to(&self, position_ms: u64) -> Result<(), PlayerError>;

    /// Get the latest playback status.
    async fn status(&self) -> Result<PlaybackStatus, PlayerError>;

    /// Release the loaded file and stop the playback machinery.
    async fn unload(&self) -> Result<(), PlayerError>;

    /// Check whether a file is loaded
    fn is_loaded(&self) -> bool;
}
