//! Microphone capture using cpal with incremental WAV output
//!
//! Samples land in a shared buffer from the audio callback and a
//! capture thread drains them into a hound writer, so memory stays
//! bounded for long takes. Mono, 16-bit; the preset picks the rate.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex as StdMutex};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use hound::{WavSpec, WavWriter};
use tokio::time::Duration as TokioDuration;
use tracing::warn;

use super::store::RecordingStore;
use crate::application::ports::{MicAccess, Recorder, RecorderError};
use crate::domain::recording::QualityPreset;

type WavFileWriter = WavWriter<std::io::BufWriter<std::fs::File>>;
type CaptureResult = Result<PathBuf, RecorderError>;

/// Microphone recorder using cpal
///
/// The stream is owned by a dedicated capture thread because
/// cpal::Stream is not Send; the async side talks to it through
/// atomics and a completion channel.
pub struct CpalRecorder {
    store: RecordingStore,
    /// Captured samples (mono, i16) pending a write to disk
    audio_buffer: Arc<StdMutex<Vec<i16>>>,
    /// Whether a capture is in flight
    is_recording: Arc<AtomicBool>,
    /// Recording start time (millis since epoch for atomic access)
    start_time_ms: Arc<AtomicU64>,
    /// Elapsed capture time in millis, ticked by the capture thread
    elapsed_ms: Arc<AtomicU64>,
    /// Completion channel of the running capture thread
    done_rx: StdMutex<Option<mpsc::Receiver<CaptureResult>>>,
}

impl CpalRecorder {
    /// Create a new cpal-based recorder writing into the given store
    pub fn new(store: RecordingStore) -> Self {
        Self {
            store,
            audio_buffer: Arc::new(StdMutex::new(Vec::new())),
            is_recording: Arc::new(AtomicBool::new(false)),
            start_time_ms: Arc::new(AtomicU64::new(0)),
            elapsed_ms: Arc::new(AtomicU64::new(0)),
            done_rx: StdMutex::new(None),
        }
    }

    /// Default microphone of the host
    fn get_input_device() -> Result<cpal::Device, RecorderError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(RecorderError::NoInputDevice)
    }

    /// Get a suitable input configuration near the target sample rate
    fn get_input_config(
        device: &cpal::Device,
        target_rate: u32,
    ) -> Result<(StreamConfig, SampleFormat), RecorderError> {
        let supported_configs = device
            .supported_input_configs()
            .map_err(|e| RecorderError::StartFailed(format!("Could not query stream configs: {}", e)))?;

        // Prefer mono and configs that can run at the target rate;
        // only i16 and f32 formats are considered
        let mut best_config: Option<cpal::SupportedStreamConfigRange> = None;

        for config in supported_configs {
            if config.sample_format() != SampleFormat::I16
                && config.sample_format() != SampleFormat::F32
            {
                continue;
            }

            let includes_target = config.min_sample_rate().0 <= target_rate
                && config.max_sample_rate().0 >= target_rate;

            let is_better = match &best_config {
                None => true,
                Some(current) => {
                    let fewer_channels = config.channels() < current.channels();
                    let better_rate = includes_target
                        && (current.min_sample_rate().0 > target_rate
                            || current.max_sample_rate().0 < target_rate);
                    fewer_channels || better_rate
                }
            };
            if is_better {
                best_config = Some(config);
            }
        }

        let config_range = best_config.ok_or(RecorderError::StartFailed(
            "No suitable input config found".into(),
        ))?;

        // Land on the target rate when the device supports it,
        // otherwise on the nearest supported rate
        let sample_rate = SampleRate(target_rate.clamp(
            config_range.min_sample_rate().0,
            config_range.max_sample_rate().0,
        ));

        let sample_format = config_range.sample_format();
        let config = StreamConfig {
            channels: config_range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Average interleaved channels down to mono
    fn stereo_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels == 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|chunk| {
                let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    }

    /// Move everything captured so far from the buffer into the writer
    fn drain_samples(
        audio_buffer: &StdMutex<Vec<i16>>,
        writer: &mut WavFileWriter,
    ) -> Result<(), hound::Error> {
        let samples = {
            let mut buffer = audio_buffer.lock().unwrap();
            std::mem::take(&mut *buffer)
        };
        for sample in samples {
            writer.write_sample(sample)?;
        }
        Ok(())
    }

    /// Body of the capture thread: open the device, stream samples into
    /// the WAV file until the recording flag clears, then finalize.
    fn run_capture(
        path: &Path,
        target_rate: u32,
        audio_buffer: &Arc<StdMutex<Vec<i16>>>,
        is_recording: &Arc<AtomicBool>,
        start_time_ms: &Arc<AtomicU64>,
        elapsed_ms: &Arc<AtomicU64>,
    ) -> CaptureResult {
        let device = Self::get_input_device()?;
        let (config, sample_format) = Self::get_input_config(&device, target_rate)?;
        let channels = config.channels;

        let spec = WavSpec {
            channels: 1,
            sample_rate: config.sample_rate.0,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec)
            .map_err(|e| RecorderError::StartFailed(format!("Failed to create file: {}", e)))?;

        let audio_buffer_clone = Arc::clone(audio_buffer);
        let is_recording_clone = Arc::clone(is_recording);

        let stream = match sample_format {
            SampleFormat::I16 => device
                .build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        if is_recording_clone.load(Ordering::SeqCst) {
                            let mono = CpalRecorder::stereo_to_mono(data, channels);
                            if let Ok(mut buffer) = audio_buffer_clone.lock() {
                                buffer.extend_from_slice(&mono);
                            }
                        }
                    },
                    |err| warn!("audio stream error: {err}"),
                    None,
                )
                .map_err(|e| RecorderError::StartFailed(e.to_string()))?,

            SampleFormat::F32 => {
                let audio_buffer_clone = Arc::clone(audio_buffer);
                let is_recording_clone = Arc::clone(is_recording);

                device
                    .build_input_stream(
                        &config,
                        move |data: &[f32], _: &cpal::InputCallbackInfo| {
                            if is_recording_clone.load(Ordering::SeqCst) {
                                let i16_data: Vec<i16> =
                                    data.iter().map(|&s| (s * 32767.0) as i16).collect();
                                let mono = CpalRecorder::stereo_to_mono(&i16_data, channels);
                                if let Ok(mut buffer) = audio_buffer_clone.lock() {
                                    buffer.extend_from_slice(&mono);
                                }
                            }
                        },
                        |err| warn!("audio stream error: {err}"),
                        None,
                    )
                    .map_err(|e| RecorderError::StartFailed(e.to_string()))?
            }

            _ => {
                return Err(RecorderError::StartFailed(
                    "Sample format not supported".into(),
                ))
            }
        };

        stream
            .play()
            .map_err(|e| RecorderError::StartFailed(e.to_string()))?;

        // Stream until stopped, draining the buffer to disk as we go
        let mut write_error: Option<hound::Error> = None;
        while is_recording.load(Ordering::SeqCst) {
            if let Err(e) = Self::drain_samples(audio_buffer, &mut writer) {
                write_error = Some(e);
                break;
            }

            let now = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0);
            let start = start_time_ms.load(Ordering::SeqCst);
            elapsed_ms.store(now.saturating_sub(start), Ordering::SeqCst);

            std::thread::sleep(std::time::Duration::from_millis(100));
        }

        drop(stream);

        if let Some(e) = write_error {
            return Err(RecorderError::CaptureFailed(e.to_string()));
        }

        Self::drain_samples(audio_buffer, &mut writer)
            .map_err(|e| RecorderError::CaptureFailed(e.to_string()))?;
        writer
            .finalize()
            .map_err(|e| RecorderError::FinalizeFailed(e.to_string()))?;

        Ok(path.to_path_buf())
    }
}

#[async_trait]
impl Recorder for CpalRecorder {
    async fn request_access(&self) -> Result<MicAccess, RecorderError> {
        // No permission dialog on the desktop: a usable default input
        // device is the grant
        let access = tokio::task::spawn_blocking(|| {
            let host = cpal::default_host();
            match host.default_input_device() {
                Some(device) => match device.default_input_config() {
                    Ok(_) => MicAccess::Granted,
                    Err(_) => MicAccess::Denied,
                },
                None => MicAccess::Denied,
            }
        })
        .await
        .map_err(|e| RecorderError::StartFailed(format!("Probe task error: {}", e)))?;

        Ok(access)
    }

    async fn start(&self, preset: QualityPreset) -> Result<(), RecorderError> {
        if self.is_recording.load(Ordering::SeqCst) {
            return Err(RecorderError::AlreadyRecording);
        }

        let path = self
            .store
            .new_recording_path()
            .map_err(|e| RecorderError::StartFailed(format!("Failed to create file: {}", e)))?;

        // Drop samples left over from the previous take
        {
            let mut buffer = self.audio_buffer.lock().unwrap();
            buffer.clear();
        }

        self.is_recording.store(true, Ordering::SeqCst);

        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        self.start_time_ms.store(now, Ordering::SeqCst);
        self.elapsed_ms.store(0, Ordering::SeqCst);

        let (done_tx, done_rx) = mpsc::channel();

        // Clone Arcs for the capture thread
        let audio_buffer = Arc::clone(&self.audio_buffer);
        let is_recording = Arc::clone(&self.is_recording);
        let start_time_ms = Arc::clone(&self.start_time_ms);
        let elapsed_ms = Arc::clone(&self.elapsed_ms);
        let target_rate = preset.sample_rate();

        // Run capture on a plain thread (not spawn_blocking since the
        // stream outlives this call)
        std::thread::spawn(move || {
            let result = CpalRecorder::run_capture(
                &path,
                target_rate,
                &audio_buffer,
                &is_recording,
                &start_time_ms,
                &elapsed_ms,
            );
            is_recording.store(false, Ordering::SeqCst);
            let _ = done_tx.send(result);
        });

        // Let the capture thread open the stream before we report success
        tokio::time::sleep(TokioDuration::from_millis(50)).await;

        if !self.is_recording.load(Ordering::SeqCst) {
            let err = done_rx
                .try_recv()
                .ok()
                .and_then(|result| result.err())
                .unwrap_or_else(|| {
                    RecorderError::StartFailed("Capture thread exited early".into())
                });
            return Err(err);
        }

        *self.done_rx.lock().unwrap() = Some(done_rx);

        Ok(())
    }

    async fn stop(&self) -> Result<PathBuf, RecorderError> {
        let done_rx = self.done_rx.lock().unwrap().take();
        let Some(done_rx) = done_rx else {
            return Err(RecorderError::NotRecording);
        };

        // Clearing the flag ends the capture loop; the thread then
        // finalizes the file and reports through the channel
        self.is_recording.store(false, Ordering::SeqCst);

        let outcome = tokio::task::spawn_blocking(move || {
            done_rx.recv_timeout(std::time::Duration::from_secs(5))
        })
        .await
        .map_err(|e| RecorderError::FinalizeFailed(format!("Join error: {}", e)))?;

        match outcome {
            Ok(result) => result,
            Err(_) => Err(RecorderError::FinalizeFailed(
                "Capture thread did not finish".into(),
            )),
        }
    }

    fn is_recording(&self) -> bool {
        self.is_recording.load(Ordering::SeqCst)
    }

    fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_passes_mono_through() {
        let mono = vec![100i16, 200, 300];
        let result = CpalRecorder::stereo_to_mono(&mono, 1);
        assert_eq!(result, mono);
    }

    #[test]
    fn downmix_averages_stereo_pairs() {
        let stereo = vec![100i16, 200, 300, 400];
        let result = CpalRecorder::stereo_to_mono(&stereo, 2);
        assert_eq!(result, vec![150, 350]); // pairwise averages
    }

    #[test]
    fn fresh_recorder_is_not_recording() {
        let recorder = CpalRecorder::new(RecordingStore::with_dir(std::env::temp_dir()));
        assert!(!recorder.is_recording());
        assert_eq!(recorder.elapsed_ms(), 0);
    }

    #[tokio::test]
    async fn stop_without_start_fails() {
        let recorder = CpalRecorder::new(RecordingStore::with_dir(std::env::temp_dir()));
        let result = recorder.stop().await;
        assert!(matches!(result, Err(RecorderError::NotRecording)));
    }
}
