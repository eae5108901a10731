//! Recording screen transport state machine

use std::fmt;
use thiserror::Error;

/// Transport states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransportState {
    /// No recording exists yet
    #[default]
    Idle,
    /// Microphone capture in progress
    Recording,
    /// A finished memo exists and playback is not running
    Stopped,
    /// The memo is playing
    Playing,
    /// Playback is paused mid-memo
    Paused,
}

impl TransportState {
    /// Lowercase name, as shown in status lines and errors
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid transport transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid transition: cannot {action} while {current_state}")]
pub struct InvalidTransition {
    pub current_state: TransportState,
    pub action: String,
}

/// Transport entity for the recording screen.
///
/// A single enumerated state replaces independent recording/playing flags so
/// that capturing and playing at the same time is unrepresentable.
///
/// Transitions:
///   IDLE | STOPPED | PAUSED -> RECORDING (start_recording)
///   RECORDING -> STOPPED (stop_recording)
///   RECORDING -> STOPPED | IDLE (abort_recording, depending on whether an
///     earlier memo survives)
///   STOPPED -> PLAYING (begin_playback)
///   PLAYING -> PAUSED (pause_playback)
///   PAUSED -> PLAYING (resume_playback)
///   PLAYING -> STOPPED (finish_playback)
#[derive(Debug, Default)]
pub struct Transport {
    state: TransportState,
}

impl Transport {
    /// Create a new transport in idle state
    pub fn new() -> Self {
        Self {
            state: TransportState::Idle,
        }
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    /// Check if no memo exists yet
    pub fn is_idle(&self) -> bool {
        self.state == TransportState::Idle
    }

    /// Check if currently capturing
    pub fn is_recording(&self) -> bool {
        self.state == TransportState::Recording
    }

    /// Check if a memo exists and nothing is running
    pub fn is_stopped(&self) -> bool {
        self.state == TransportState::Stopped
    }

    /// Check if playback is running
    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Playing
    }

    /// Check if playback is paused
    pub fn is_paused(&self) -> bool {
        self.state == TransportState::Paused
    }

    /// Begin capturing. Valid unless already recording or playing; starting
    /// over a paused memo is allowed (the caller discards the old player).
    pub fn start_recording(&mut self) -> Result<(), InvalidTransition> {
        match self.state {
            TransportState::Idle | TransportState::Stopped | TransportState::Paused => {
                self.state = TransportState::Recording;
                Ok(())
            }
            _ => Err(InvalidTransition {
                current_state: self.state,
                action: "start recording".to_string(),
            }),
        }
    }

    /// Finish capturing with a finalized memo on disk
    pub fn stop_recording(&mut self) -> Result<(), InvalidTransition> {
        if self.state != TransportState::Recording {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "stop recording".to_string(),
            });
        }
        self.state = TransportState::Stopped;
        Ok(())
    }

    /// Leave the recording state after a failed capture or finalize.
    ///
    /// Lands in STOPPED when an earlier finished memo is still available,
    /// otherwise in IDLE. Either way the transport is usable again.
    pub fn abort_recording(&mut self, artifact_retained: bool) -> Result<(), InvalidTransition> {
        if self.state != TransportState::Recording {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "abort recording".to_string(),
            });
        }
        self.state = if artifact_retained {
            TransportState::Stopped
        } else {
            TransportState::Idle
        };
        Ok(())
    }

    /// Start playing the finished memo
    pub fn begin_playback(&mut self) -> Result<(), InvalidTransition> {
        if self.state != TransportState::Stopped {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "begin playback".to_string(),
            });
        }
        self.state = TransportState::Playing;
        Ok(())
    }

    /// Pause running playback
    pub fn pause_playback(&mut self) -> Result<(), InvalidTransition> {
        if self.state != TransportState::Playing {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "pause playback".to_string(),
            });
        }
        self.state = TransportState::Paused;
        Ok(())
    }

    /// Resume paused playback
    pub fn resume_playback(&mut self) -> Result<(), InvalidTransition> {
        if self.state != TransportState::Paused {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "resume playback".to_string(),
            });
        }
        self.state = TransportState::Playing;
        Ok(())
    }

    /// Playback reached the end of the memo
    pub fn finish_playback(&mut self) -> Result<(), InvalidTransition> {
        if self.state != TransportState::Playing {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "finish playback".to_string(),
            });
        }
        self.state = TransportState::Stopped;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_transport_is_idle() {
        let transport = Transport::new();
        assert!(transport.is_idle());
        assert!(!transport.is_recording());
        assert!(!transport.is_stopped());
        assert!(!transport.is_playing());
        assert!(!transport.is_paused());
    }

    #[test]
    fn start_recording_from_idle() {
        let mut transport = Transport::new();
        assert!(transport.start_recording().is_ok());
        assert!(transport.is_recording());
    }

    #[test]
    fn start_recording_from_stopped() {
        let mut transport = Transport::new();
        transport.start_recording().unwrap();
        transport.stop_recording().unwrap();

        assert!(transport.start_recording().is_ok());
        assert!(transport.is_recording());
    }

    #[test]
    fn start_recording_from_paused() {
        let mut transport = Transport::new();
        transport.start_recording().unwrap();
        transport.stop_recording().unwrap();
        transport.begin_playback().unwrap();
        transport.pause_playback().unwrap();

        assert!(transport.start_recording().is_ok());
        assert!(transport.is_recording());
    }

    #[test]
    fn start_recording_while_recording_fails() {
        let mut transport = Transport::new();
        transport.start_recording().unwrap();

        let err = transport.start_recording().unwrap_err();
        assert_eq!(err.current_state, TransportState::Recording);
        assert!(err.action.contains("start recording"));
    }

    #[test]
    fn start_recording_while_playing_fails() {
        let mut transport = Transport::new();
        transport.start_recording().unwrap();
        transport.stop_recording().unwrap();
        transport.begin_playback().unwrap();

        let err = transport.start_recording().unwrap_err();
        assert_eq!(err.current_state, TransportState::Playing);
    }

    #[test]
    fn stop_recording_from_recording() {
        let mut transport = Transport::new();
        transport.start_recording().unwrap();

        assert!(transport.stop_recording().is_ok());
        assert!(transport.is_stopped());
    }

    #[test]
    fn stop_recording_from_idle_fails() {
        let mut transport = Transport::new();

        let err = transport.stop_recording().unwrap_err();
        assert_eq!(err.current_state, TransportState::Idle);
    }

    #[test]
    fn abort_without_artifact_returns_to_idle() {
        let mut transport = Transport::new();
        transport.start_recording().unwrap();

        assert!(transport.abort_recording(false).is_ok());
        assert!(transport.is_idle());
    }

    #[test]
    fn abort_with_artifact_returns_to_stopped() {
        let mut transport = Transport::new();
        transport.start_recording().unwrap();
        transport.stop_recording().unwrap();
        transport.start_recording().unwrap();

        assert!(transport.abort_recording(true).is_ok());
        assert!(transport.is_stopped());
    }

    #[test]
    fn abort_when_not_recording_fails() {
        let mut transport = Transport::new();

        let err = transport.abort_recording(false).unwrap_err();
        assert_eq!(err.current_state, TransportState::Idle);
    }

    #[test]
    fn begin_playback_from_stopped() {
        let mut transport = Transport::new();
        transport.start_recording().unwrap();
        transport.stop_recording().unwrap();

        assert!(transport.begin_playback().is_ok());
        assert!(transport.is_playing());
    }

    #[test]
    fn begin_playback_from_idle_fails() {
        let mut transport = Transport::new();

        let err = transport.begin_playback().unwrap_err();
        assert_eq!(err.current_state, TransportState::Idle);
    }

    #[test]
    fn begin_playback_while_recording_fails() {
        let mut transport = Transport::new();
        transport.start_recording().unwrap();

        let err = transport.begin_playback().unwrap_err();
        assert_eq!(err.current_state, TransportState::Recording);
    }

    #[test]
    fn pause_and_resume_playback() {
        let mut transport = Transport::new();
        transport.start_recording().unwrap();
        transport.stop_recording().unwrap();
        transport.begin_playback().unwrap();

        assert!(transport.pause_playback().is_ok());
        assert!(transport.is_paused());

        assert!(transport.resume_playback().is_ok());
        assert!(transport.is_playing());
    }

    #[test]
    fn pause_when_not_playing_fails() {
        let mut transport = Transport::new();

        let err = transport.pause_playback().unwrap_err();
        assert_eq!(err.current_state, TransportState::Idle);
    }

    #[test]
    fn resume_when_not_paused_fails() {
        let mut transport = Transport::new();
        transport.start_recording().unwrap();
        transport.stop_recording().unwrap();
        transport.begin_playback().unwrap();

        let err = transport.resume_playback().unwrap_err();
        assert_eq!(err.current_state, TransportState::Playing);
    }

    #[test]
    fn finish_playback_returns_to_stopped() {
        let mut transport = Transport::new();
        transport.start_recording().unwrap();
        transport.stop_recording().unwrap();
        transport.begin_playback().unwrap();

        assert!(transport.finish_playback().is_ok());
        assert!(transport.is_stopped());
    }

    #[test]
    fn finish_playback_when_paused_fails() {
        let mut transport = Transport::new();
        transport.start_recording().unwrap();
        transport.stop_recording().unwrap();
        transport.begin_playback().unwrap();
        transport.pause_playback().unwrap();

        let err = transport.finish_playback().unwrap_err();
        assert_eq!(err.current_state, TransportState::Paused);
    }

    #[test]
    fn record_then_play_cycle() {
        let mut transport = Transport::new();
        assert!(transport.is_idle());

        transport.start_recording().unwrap();
        assert!(transport.is_recording());

        transport.stop_recording().unwrap();
        assert!(transport.is_stopped());

        transport.begin_playback().unwrap();
        assert!(transport.is_playing());

        transport.pause_playback().unwrap();
        assert!(transport.is_paused());

        transport.resume_playback().unwrap();
        transport.finish_playback().unwrap();
        assert!(transport.is_stopped());

        // A new take can start over the finished one
        transport.start_recording().unwrap();
        assert!(transport.is_recording());
    }

    #[test]
    fn display_uses_lowercase_names() {
        assert_eq!(TransportState::Idle.to_string(), "idle");
        assert_eq!(TransportState::Recording.to_string(), "recording");
        assert_eq!(TransportState::Stopped.to_string(), "stopped");
        assert_eq!(TransportState::Playing.to_string(), "playing");
        assert_eq!(TransportState::Paused.to_string(), "paused");
    }

    #[test]
    fn invalid_transition_message() {
        let err = InvalidTransition {
            current_state: TransportState::Playing,
            action: "start recording".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("start recording"));
        assert!(msg.contains("playing"));
    }
}
