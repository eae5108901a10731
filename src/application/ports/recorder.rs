//! Recording port interface

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::recording::QualityPreset;

/// Failures raised by recorder adapters
#[derive(Debug, Clone, Error)]
pub enum RecorderError {
    #[error("No audio input device available")]
    NoInputDevice,

    #[error("A recording is already running")]
    AlreadyRecording,

    #[error("No recording is running")]
    NotRecording,

    #[error("Could not start recording: {0}")]
    StartFailed(String),

    #[error("Audio capture failed: {0}")]
    CaptureFailed(String),

    #[error("Failed to finalize recording: {0}")]
    FinalizeFailed(String),
}

/// Result of a microphone access request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicAccess {
    Granted,
    Denied,
}

/// Port for signal-controlled microphone capture to a file
#[async_trait]
pub trait Recorder: Send + Sync {
    /// Check whether the microphone can be opened.
    ///
    /// Denial is an expected, retryable outcome and not an error.
    async fn request_access(&self) -> Result<MicAccess, RecorderError>;

    /// Start capturing at the given quality preset.
    async fn start(&self, preset: QualityPreset) -> Result<(), RecorderError>;

    /// Stop capturing and finalize the output file.
    ///
    /// # Returns
    /// The path of the finished recording
    async fn stop(&self) -> Result<PathBuf, RecorderError>;

    /// Whether a capture is currently running
    fn is_recording(&self) -> bool;

    /// Milliseconds of audio captured so far
    fn elapsed_ms(&self) -> u64;
}
