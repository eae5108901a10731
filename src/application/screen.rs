//! Recording screen use case

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::config::DEFAULT_KEEP_ALIVE_SECS;
use crate::domain::recording::{QualityPreset, Timecode};
use crate::domain::transport::{InvalidTransition, Transport, TransportState};

use super::ports::{
    ChannelSpec, Importance, MicAccess, NotificationKind, NotifyAccess, PlaybackOptions,
    PlaybackStatus, Player, PlayerError, Recorder, RecorderError, StatusCallback, StatusNotifier,
    TaskJob, TaskScheduler,
};

/// How often the live notification refreshes while recording
pub const STATUS_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// How often the player reports playback progress
pub const PROGRESS_UPDATE_INTERVAL: Duration = Duration::from_millis(100);

/// Name of the recurring keep-alive background task
pub const KEEP_ALIVE_TASK: &str = "recording-keep-alive";

/// Channel the live status notification is delivered on
const STATUS_CHANNEL: ChannelSpec = ChannelSpec {
    id: "recording-status",
    name: "Recording status",
    importance: Importance::High,
};

/// Errors from the recording screen use case
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("Recorder error: {0}")]
    Recorder(#[from] RecorderError),

    #[error("Player error: {0}")]
    Player(#[from] PlayerError),

    #[error("{0}")]
    Transport(#[from] InvalidTransition),

    #[error("Nothing recorded yet")]
    NothingToPlay,
}

/// Configuration for the recording screen
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    /// Capture quality preset
    pub quality: QualityPreset,
    /// Whether to keep a live desktop notification while recording
    pub live_status: bool,
    /// Minimum interval for the keep-alive background task
    pub keep_alive_interval: Duration,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            quality: QualityPreset::default(),
            live_status: false,
            keep_alive_interval: Duration::from_secs(DEFAULT_KEEP_ALIVE_SECS),
        }
    }
}

/// Result of a start-recording request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Capture is running
    Started,
    /// Microphone access was denied; nothing changed
    AccessDenied,
}

/// Result of a play/pause toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackToggle {
    /// Playback started from the top
    Started,
    /// Paused playback resumed
    Resumed,
    /// Running playback paused
    Paused,
}

/// Recording screen use case.
///
/// Owns the transport state machine and drives the recorder, player,
/// notifier and background scheduler ports. At most one capture session
/// and one loaded player exist at a time; the transport makes recording
/// and playing at once unrepresentable.
pub struct RecordingScreenUseCase<R, P, N, B>
where
    R: Recorder + 'static,
    P: Player,
    N: StatusNotifier + 'static,
    B: TaskScheduler,
{
    recorder: Arc<R>,
    player: P,
    notifier: Arc<N>,
    scheduler: B,
    transport: Arc<Mutex<Transport>>,
    playback: Arc<Mutex<PlaybackStatus>>,
    recording_path: Mutex<Option<PathBuf>>,
    status_timer: Mutex<Option<JoinHandle<()>>>,
    config: ScreenConfig,
}

impl<R, P, N, B> RecordingScreenUseCase<R, P, N, B>
where
    R: Recorder + 'static,
    P: Player,
    N: StatusNotifier + 'static,
    B: TaskScheduler,
{
    /// Create a new recording screen instance
    pub fn new(recorder: R, player: P, notifier: N, scheduler: B, config: ScreenConfig) -> Self {
        Self {
            recorder: Arc::new(recorder),
            player,
            notifier: Arc::new(notifier),
            scheduler,
            transport: Arc::new(Mutex::new(Transport::new())),
            playback: Arc::new(Mutex::new(PlaybackStatus::default())),
            recording_path: Mutex::new(None),
            status_timer: Mutex::new(None),
            config,
        }
    }

    /// Prepare the screen: probe the input device and, when live status is
    /// enabled, request notification access and install the notification
    /// channel. All of it is best-effort.
    pub async fn mount(&self) {
        match self.recorder.request_access().await {
            Ok(MicAccess::Granted) => debug!("audio input ready"),
            Ok(MicAccess::Denied) => warn!("no usable audio input found at startup"),
            Err(e) => warn!("audio input probe failed: {e}"),
        }

        if self.config.live_status {
            match self.notifier.request_access().await {
                Ok(NotifyAccess::Granted) => debug!("notifications ready"),
                Ok(NotifyAccess::Denied) => warn!("notification access denied at startup"),
                Err(e) => warn!("notification access request failed: {e}"),
            }
            if let Err(e) = self.notifier.install_channel(&STATUS_CHANNEL).await {
                warn!("could not install notification channel: {e}");
            }
        }
    }

    /// Release everything the screen holds. Each step is independent:
    /// a failing release is logged and the remaining steps still run.
    pub async fn unmount(&self) {
        if self.lock_transport().is_recording() {
            match self.recorder.stop().await {
                Ok(path) => {
                    let _ = self.lock_transport().stop_recording();
                    *self
                        .recording_path
                        .lock()
                        .unwrap_or_else(|e| e.into_inner()) = Some(path);
                }
                Err(e) => {
                    warn!("recording session was not released cleanly: {e}");
                    let retained = self
                        .recording_path
                        .lock()
                        .unwrap_or_else(|e| e.into_inner())
                        .is_some();
                    let _ = self.lock_transport().abort_recording(retained);
                }
            }
        }

        if self.player.is_loaded() {
            if let Err(e) = self.player.unload().await {
                warn!("player was not released cleanly: {e}");
            }
        }

        if self.config.live_status {
            self.end_live_status().await;
            if let Err(e) = self.notifier.dismiss_all().await {
                debug!("pending notifications were not dismissed: {e}");
            }
        }
    }

    /// Start capturing from the default microphone.
    ///
    /// Denied microphone access is a recoverable outcome, not an error;
    /// the transport is left unchanged and the user may retry. Starting
    /// over a paused or finished memo discards the loaded player first.
    pub async fn start_recording(&self) -> Result<StartOutcome, ScreenError> {
        match self.recorder.request_access().await? {
            MicAccess::Granted => {}
            MicAccess::Denied => return Ok(StartOutcome::AccessDenied),
        }

        {
            let mut transport = self.lock_transport();
            transport.start_recording()?;
        }

        // A new take replaces any loaded memo
        if self.player.is_loaded() {
            if let Err(e) = self.player.unload().await {
                warn!("previous player was not released cleanly: {e}");
            }
        }
        *self.playback.lock().unwrap_or_else(|e| e.into_inner()) = PlaybackStatus::default();

        if let Err(e) = self.recorder.start(self.config.quality).await {
            let retained = self
                .recording_path
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .is_some();
            let _ = self.lock_transport().abort_recording(retained);
            return Err(e.into());
        }

        if self.config.live_status {
            self.begin_live_status().await;
        }

        Ok(StartOutcome::Started)
    }

    /// Finalize the running capture session and return the memo path.
    ///
    /// When finalize fails the transport aborts out of the recording
    /// state: back to stopped when an earlier memo survives, otherwise
    /// to idle.
    pub async fn stop_recording(&self) -> Result<PathBuf, ScreenError> {
        {
            let transport = self.lock_transport();
            if !transport.is_recording() {
                return Err(InvalidTransition {
                    current_state: transport.state(),
                    action: "stop recording".to_string(),
                }
                .into());
            }
        }

        let stopped = self.recorder.stop().await;

        if self.config.live_status {
            self.end_live_status().await;
        }

        match stopped {
            Ok(path) => {
                {
                    let mut transport = self.lock_transport();
                    transport.stop_recording()?;
                }
                *self
                    .recording_path
                    .lock()
                    .unwrap_or_else(|e| e.into_inner()) = Some(path.clone());

                if self.config.live_status {
                    let _ = self
                        .notifier
                        .post(
                            "Recording complete",
                            &format!("Saved {}", path.display()),
                            NotificationKind::Complete,
                        )
                        .await;
                }

                Ok(path)
            }
            Err(e) => {
                let retained = self
                    .recording_path
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .is_some();
                let _ = self.lock_transport().abort_recording(retained);
                Err(e.into())
            }
        }
    }

    /// Toggle playback of the recorded memo.
    ///
    /// The first toggle after a recording loads exactly one player and
    /// starts it; later toggles pause and resume that same player. After
    /// the memo plays to its end the next toggle starts from the top.
    pub async fn toggle_playback(&self) -> Result<PlaybackToggle, ScreenError> {
        let state = self.lock_transport().state();

        match state {
            TransportState::Playing => {
                self.player.pause().await?;
                let mut transport = self.lock_transport();
                match transport.pause_playback() {
                    Ok(()) => Ok(PlaybackToggle::Paused),
                    // The memo can reach its end in the instant before the
                    // pause lands; the finish callback has already parked
                    // the transport, leaving nothing to pause.
                    Err(e) if e.current_state == TransportState::Stopped => {
                        Ok(PlaybackToggle::Paused)
                    }
                    Err(e) => Err(e.into()),
                }
            }
            TransportState::Paused => {
                self.player.play().await?;
                let mut transport = self.lock_transport();
                transport.resume_playback()?;
                Ok(PlaybackToggle::Resumed)
            }
            TransportState::Idle => Err(ScreenError::NothingToPlay),
            TransportState::Recording => Err(InvalidTransition {
                current_state: state,
                action: "begin playback".to_string(),
            }
            .into()),
            TransportState::Stopped => {
                let path = self
                    .recording_path
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .clone()
                    .ok_or(ScreenError::NothingToPlay)?;

                if !self.player.is_loaded() {
                    let options = PlaybackOptions {
                        progress_interval: PROGRESS_UPDATE_INTERVAL,
                    };
                    self.player
                        .load(&path, &options, self.status_callback())
                        .await?;
                }

                self.player.play().await?;
                let mut transport = self.lock_transport();
                transport.begin_playback()?;
                Ok(PlaybackToggle::Started)
            }
        }
    }

    /// Seek the loaded memo to the given position.
    ///
    /// The target is clamped to the memo duration; the clamped position
    /// is returned. The reported playback position converges within one
    /// progress tick.
    pub async fn seek(&self, target: Timecode) -> Result<Timecode, ScreenError> {
        if !self.player.is_loaded() {
            return Err(ScreenError::Player(PlayerError::NotLoaded));
        }

        let duration_ms = self.player.status().await?.duration_ms;
        let clamped = target.clamp_to(Timecode::from_millis(duration_ms));
        self.player.seek_to(clamped.as_millis()).await?;

        Ok(clamped)
    }

    /// Get the current transport state
    pub fn state(&self) -> TransportState {
        self.lock_transport().state()
    }

    /// Get elapsed capture time while recording
    pub fn recording_elapsed(&self) -> Timecode {
        Timecode::from_millis(self.recorder.elapsed_ms())
    }

    /// Get the latest playback progress snapshot
    pub fn playback_status(&self) -> PlaybackStatus {
        *self.playback.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get the path of the finished memo, if one exists
    pub fn recording_path(&self) -> Option<PathBuf> {
        self.recording_path
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Progress callback handed to the player. Keeps the playback
    /// snapshot current and folds natural end-of-memo into the transport.
    fn status_callback(&self) -> StatusCallback {
        let transport = Arc::clone(&self.transport);
        let playback = Arc::clone(&self.playback);

        Arc::new(move |status: PlaybackStatus| {
            if status.did_just_finish {
                let mut transport = transport.lock().unwrap_or_else(|e| e.into_inner());
                if transport.is_playing() {
                    let _ = transport.finish_playback();
                }
            }
            *playback.lock().unwrap_or_else(|e| e.into_inner()) = status;
        })
    }

    /// Bring up the live recording status: the keep-alive task, the
    /// persistent notification and its refresh timer. All best-effort.
    async fn begin_live_status(&self) {
        let recorder = Arc::clone(&self.recorder);
        let job: TaskJob = Arc::new(move || {
            debug!("keep-alive: recording for {} ms", recorder.elapsed_ms());
        });
        if let Err(e) = self
            .scheduler
            .register(KEEP_ALIVE_TASK, self.config.keep_alive_interval, job)
            .await
        {
            warn!("could not register keep-alive task: {e}");
        }

        match self.notifier.request_access().await {
            Ok(NotifyAccess::Granted) => {}
            Ok(NotifyAccess::Denied) => {
                warn!("notification access denied; live status is off");
                return;
            }
            Err(e) => {
                warn!("notification access probe failed: {e}");
                return;
            }
        }

        let _ = self
            .notifier
            .show_status("Recording in progress", "Duration: 0:00")
            .await;

        let recorder = Arc::clone(&self.recorder);
        let notifier = Arc::clone(&self.notifier);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(STATUS_REFRESH_INTERVAL);
            // the first tick fires immediately and duplicates the
            // initial notification, so consume it
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if !recorder.is_recording() {
                    break;
                }
                let elapsed = Timecode::from_millis(recorder.elapsed_ms());
                if let Err(e) = notifier
                    .show_status("Recording in progress", &format!("Duration: {elapsed}"))
                    .await
                {
                    debug!("live status update failed: {e}");
                }
            }
        });

        let replaced = self
            .status_timer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(handle);
        if let Some(old) = replaced {
            old.abort();
        }
    }

    /// Tear the live recording status back down. Each step is
    /// independent: the timer stops, the task unregisters and the
    /// notification dismisses regardless of each other.
    async fn end_live_status(&self) {
        let timer = self
            .status_timer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(handle) = timer {
            handle.abort();
        }

        if let Err(e) = self.scheduler.unregister(KEEP_ALIVE_TASK).await {
            debug!("keep-alive task was not unregistered: {e}");
        }

        if let Err(e) = self.notifier.dismiss_status().await {
            debug!("live notification was not dismissed: {e}");
        }
    }

    fn lock_transport(&self) -> std::sync::MutexGuard<'_, Transport> {
        self.transport.lock().unwrap_or_else(|e| e.into_inner())
    }
}
