//! Memo playback using rodio
//!
//! The output stream and sink are owned by a dedicated worker thread
//! because rodio's stream handle is not Send; the async side sends
//! commands over a channel and reads a shared status snapshot the
//! worker refreshes on every progress tick. Play carries a reply
//! channel so a memo that can no longer be reopened fails the call.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex as StdMutex};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, Sink};
use tracing::{debug, warn};

use crate::application::ports::{
    PlaybackOptions, PlaybackStatus, Player, PlayerError, StatusCallback,
};

enum PlayerCommand {
    Play(mpsc::Sender<Result<(), PlayerError>>),
    Pause,
    Seek(u64),
    Unload,
}

struct PlayerShared {
    status: StdMutex<PlaybackStatus>,
    loaded: AtomicBool,
}

struct PlayerWorker {
    cmd_tx: mpsc::Sender<PlayerCommand>,
    handle: std::thread::JoinHandle<()>,
}

/// Memo player using rodio
pub struct RodioPlayer {
    shared: Arc<PlayerShared>,
    worker: StdMutex<Option<PlayerWorker>>,
}

impl RodioPlayer {
    /// Create a new rodio-based player with nothing loaded
    pub fn new() -> Self {
        Self {
            shared: Arc::new(PlayerShared {
                status: StdMutex::new(PlaybackStatus::default()),
                loaded: AtomicBool::new(false),
            }),
            worker: StdMutex::new(None),
        }
    }

    /// Read the memo duration from the WAV header
    fn wav_duration_ms(path: &Path) -> Result<u64, PlayerError> {
        let reader =
            hound::WavReader::open(path).map_err(|e| PlayerError::LoadFailed(e.to_string()))?;
        let spec = reader.spec();
        if spec.sample_rate == 0 {
            return Err(PlayerError::LoadFailed("Invalid sample rate".into()));
        }
        Ok(reader.duration() as u64 * 1000 / spec.sample_rate as u64)
    }

    /// Open a fresh decoder over the memo file
    fn open_source(path: &Path) -> Result<Decoder<BufReader<File>>, PlayerError> {
        let file = File::open(path).map_err(|e| PlayerError::LoadFailed(e.to_string()))?;
        Decoder::new(BufReader::new(file)).map_err(|e| PlayerError::LoadFailed(e.to_string()))
    }

    fn send_command(&self, command: PlayerCommand) -> Result<(), PlayerError> {
        let worker = self.worker.lock().unwrap_or_else(|e| e.into_inner());
        let Some(worker) = worker.as_ref() else {
            return Err(PlayerError::NotLoaded);
        };
        worker
            .cmd_tx
            .send(command)
            .map_err(|_| PlayerError::PlaybackFailed("Player thread is gone".into()))
    }

    /// Body of the playback thread: open the device and the memo, then
    /// serve commands until unloaded, publishing a status snapshot on
    /// every progress tick.
    fn run_playback(
        path: PathBuf,
        progress_interval: StdDuration,
        shared: Arc<PlayerShared>,
        on_status: StatusCallback,
        cmd_rx: mpsc::Receiver<PlayerCommand>,
        ready_tx: mpsc::Sender<Result<u64, PlayerError>>,
    ) {
        let duration_ms = match Self::wav_duration_ms(&path) {
            Ok(d) => d,
            Err(e) => {
                let _ = ready_tx.send(Err(e));
                return;
            }
        };

        let (_stream, stream_handle) = match OutputStream::try_default() {
            Ok(pair) => pair,
            Err(_) => {
                let _ = ready_tx.send(Err(PlayerError::NoOutputDevice));
                return;
            }
        };

        let sink = match Sink::try_new(&stream_handle) {
            Ok(s) => s,
            Err(e) => {
                let _ = ready_tx.send(Err(PlayerError::LoadFailed(e.to_string())));
                return;
            }
        };

        match Self::open_source(&path) {
            Ok(source) => {
                // Loading never autoplays; playback waits for a command
                sink.pause();
                sink.append(source);
            }
            Err(e) => {
                let _ = ready_tx.send(Err(e));
                return;
            }
        }

        if ready_tx.send(Ok(duration_ms)).is_err() {
            return;
        }

        let mut source_loaded = true;
        loop {
            match cmd_rx.recv_timeout(progress_interval) {
                Ok(PlayerCommand::Play(done_tx)) => {
                    // After a natural end the sink is drained, so a new
                    // play starts over from the top
                    let rearmed = if !source_loaded || sink.empty() {
                        match Self::open_source(&path) {
                            Ok(source) => {
                                sink.append(source);
                                source_loaded = true;
                                Ok(())
                            }
                            Err(e) => {
                                warn!("could not reopen memo: {e}");
                                Err(e)
                            }
                        }
                    } else {
                        Ok(())
                    };
                    if rearmed.is_ok() {
                        sink.play();
                    }
                    let _ = done_tx.send(rearmed);
                }
                Ok(PlayerCommand::Pause) => sink.pause(),
                Ok(PlayerCommand::Seek(ms)) => {
                    if !source_loaded || sink.empty() {
                        if let Ok(source) = Self::open_source(&path) {
                            sink.pause();
                            sink.append(source);
                            source_loaded = true;
                        }
                    }
                    if let Err(e) = sink.try_seek(StdDuration::from_millis(ms)) {
                        debug!("seek failed: {e:?}");
                    }
                }
                Ok(PlayerCommand::Unload) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                Err(mpsc::RecvTimeoutError::Timeout) => {}
            }

            let status = if source_loaded && sink.empty() {
                // The memo just played to its end: report it once, park
                // the position back at the start and keep the player
                source_loaded = false;
                sink.pause();
                PlaybackStatus {
                    position_ms: 0,
                    duration_ms,
                    is_playing: false,
                    did_just_finish: true,
                }
            } else {
                let position_ms = (sink.get_pos().as_millis() as u64).min(duration_ms);
                PlaybackStatus {
                    position_ms: if source_loaded { position_ms } else { 0 },
                    duration_ms,
                    is_playing: source_loaded && !sink.is_paused(),
                    did_just_finish: false,
                }
            };

            *shared.status.lock().unwrap_or_else(|e| e.into_inner()) = status;
            on_status(status);
        }

        sink.stop();
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Player for RodioPlayer {
    async fn load(
        &self,
        path: &Path,
        options: &PlaybackOptions,
        on_status: StatusCallback,
    ) -> Result<(), PlayerError> {
        // Replace whatever was loaded before
        self.unload().await?;

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::channel();
        let shared = Arc::clone(&self.shared);
        let path = path.to_path_buf();
        let progress_interval = options.progress_interval;

        let handle = std::thread::spawn(move || {
            Self::run_playback(path, progress_interval, shared, on_status, cmd_rx, ready_tx);
        });

        let ready = tokio::task::spawn_blocking(move || {
            ready_rx.recv_timeout(StdDuration::from_secs(2))
        })
        .await
        .map_err(|e| PlayerError::LoadFailed(format!("Join error: {}", e)))?;

        let duration_ms = match ready {
            Ok(Ok(duration_ms)) => duration_ms,
            Ok(Err(e)) => {
                let _ = handle.join();
                return Err(e);
            }
            Err(_) => {
                return Err(PlayerError::LoadFailed(
                    "Player thread did not start".into(),
                ))
            }
        };

        *self.shared.status.lock().unwrap_or_else(|e| e.into_inner()) = PlaybackStatus {
            position_ms: 0,
            duration_ms,
            is_playing: false,
            did_just_finish: false,
        };
        self.shared.loaded.store(true, Ordering::SeqCst);
        *self.worker.lock().unwrap_or_else(|e| e.into_inner()) = Some(PlayerWorker {
            cmd_tx,
            handle,
        });

        Ok(())
    }

    async fn play(&self) -> Result<(), PlayerError> {
        let (done_tx, done_rx) = mpsc::channel();
        self.send_command(PlayerCommand::Play(done_tx))?;

        let played = tokio::task::spawn_blocking(move || {
            done_rx.recv_timeout(StdDuration::from_secs(2))
        })
        .await
        .map_err(|e| PlayerError::PlaybackFailed(format!("Join error: {}", e)))?;

        match played {
            Ok(result) => result,
            Err(_) => Err(PlayerError::PlaybackFailed(
                "Player thread did not answer".into(),
            )),
        }
    }

    async fn pause(&self) -> Result<(), PlayerError> {
        self.send_command(PlayerCommand::Pause)
    }

    async fn seek_to(&self, position_ms: u64) -> Result<(), PlayerError> {
        self.send_command(PlayerCommand::Seek(position_ms))
    }

    async fn status(&self) -> Result<PlaybackStatus, PlayerError> {
        if !self.is_loaded() {
            return Err(PlayerError::NotLoaded);
        }
        Ok(*self.shared.status.lock().unwrap_or_else(|e| e.into_inner()))
    }

    async fn unload(&self) -> Result<(), PlayerError> {
        let worker = self.worker.lock().unwrap_or_else(|e| e.into_inner()).take();
        let Some(worker) = worker else {
            return Ok(());
        };

        self.shared.loaded.store(false, Ordering::SeqCst);
        let _ = worker.cmd_tx.send(PlayerCommand::Unload);
        let _ = tokio::task::spawn_blocking(move || worker.handle.join()).await;
        *self.shared.status.lock().unwrap_or_else(|e| e.into_inner()) = PlaybackStatus::default();

        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.shared.loaded.load(Ordering::SeqCst)
    }
}
