//! Microphone capture using cpal
//!
//! Buffers mono i16 samples at the device's native rate and writes a WAV
//! file when the capture is stopped. The cpal stream lives on a dedicated
//! thread because it is not Send.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use chrono::Utc;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;
use tokio::sync::oneshot;
use tokio::time::{sleep, Duration};
use tracing::{debug, warn};

use crate::application::ports::{AudioCapture, CaptureError, PermissionStatus};

/// Microphone capture adapter over the default cpal input device.
pub struct CpalCapture {
    /// Directory where finished clips are written
    recordings_dir: PathBuf,
    /// Buffered audio samples (mono, i16, at device sample rate)
    sample_buffer: Arc<StdMutex<Vec<i16>>>,
    /// Sample rate of the live capture
    device_sample_rate: Arc<AtomicU32>,
    /// Whether a capture is live
    is_capturing: Arc<AtomicBool>,
}

impl CpalCapture {
    /// Create a capture adapter writing clips into `recordings_dir`
    pub fn new(recordings_dir: impl Into<PathBuf>) -> Self {
        Self {
            recordings_dir: recordings_dir.into(),
            sample_buffer: Arc::new(StdMutex::new(Vec::new())),
            device_sample_rate: Arc::new(AtomicU32::new(0)),
            is_capturing: Arc::new(AtomicBool::new(false)),
        }
    }

    fn input_device() -> Option<cpal::Device> {
        cpal::default_host().default_input_device()
    }

    /// Mix interleaved multi-channel samples down to mono
    fn mix_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels == 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    }

    /// Write mono samples to a timestamped WAV file, returning its path
    fn write_wav(
        samples: &[i16],
        sample_rate: u32,
        dir: &Path,
    ) -> Result<PathBuf, CaptureError> {
        std::fs::create_dir_all(dir)
            .map_err(|e| CaptureError::CaptureFailed(format!("Cannot create {}: {}", dir.display(), e)))?;

        let name = format!("clip-{}.wav", Utc::now().format("%Y%m%d-%H%M%S%3f"));
        let path = dir.join(name);

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(&path, spec)
            .map_err(|e| CaptureError::CaptureFailed(format!("Cannot create WAV: {}", e)))?;
        for &sample in samples {
            writer
                .write_sample(sample)
                .map_err(|e| CaptureError::CaptureFailed(format!("WAV write failed: {}", e)))?;
        }
        writer
            .finalize()
            .map_err(|e| CaptureError::CaptureFailed(format!("WAV finalize failed: {}", e)))?;

        Ok(path)
    }
}

#[async_trait]
impl AudioCapture for CpalCapture {
    async fn request_permission(&self) -> Result<PermissionStatus, CaptureError> {
        // Desktop hosts have no explicit permission prompt; a usable input
        // device stands in for "granted".
        let status = tokio::task::spawn_blocking(|| match Self::input_device() {
            Some(device) => match device.default_input_config() {
                Ok(_) => PermissionStatus::Granted,
                Err(e) => {
                    debug!("Input device unusable: {}", e);
                    PermissionStatus::Denied
                }
            },
            None => PermissionStatus::Denied,
        })
        .await
        .map_err(|e| CaptureError::ConfigurationFailed(format!("Task join error: {}", e)))?;

        Ok(status)
    }

    async fn start(&self) -> Result<(), CaptureError> {
        if self.is_capturing.load(Ordering::SeqCst) {
            return Err(CaptureError::AlreadyCapturing);
        }

        self.sample_buffer.lock().unwrap().clear();
        self.is_capturing.store(true, Ordering::SeqCst);

        let sample_buffer = Arc::clone(&self.sample_buffer);
        let device_sample_rate = Arc::clone(&self.device_sample_rate);
        let is_capturing = Arc::clone(&self.is_capturing);

        // The capture thread reports bring-up success or failure over this
        // channel once the stream is playing (or could not be built).
        let (ready_tx, ready_rx) = oneshot::channel::<Result<(), CaptureError>>();

        // The stream must be built and kept alive on its own thread.
        std::thread::spawn(move || {
            let Some(device) = CpalCapture::input_device() else {
                is_capturing.store(false, Ordering::SeqCst);
                let _ = ready_tx.send(Err(CaptureError::NoInputDevice));
                return;
            };

            let supported = match device.default_input_config() {
                Ok(c) => c,
                Err(e) => {
                    is_capturing.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(CaptureError::ConfigurationFailed(format!(
                        "No usable input config: {}",
                        e
                    ))));
                    return;
                }
            };

            let sample_format = supported.sample_format();
            let config = supported.config();
            let channels = config.channels;
            device_sample_rate.store(config.sample_rate.0, Ordering::SeqCst);

            let buffer = Arc::clone(&sample_buffer);
            let capturing = Arc::clone(&is_capturing);

            let stream_result = match sample_format {
                SampleFormat::I16 => device.build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        if capturing.load(Ordering::SeqCst) {
                            let mono = CpalCapture::mix_to_mono(data, channels);
                            if let Ok(mut buf) = buffer.lock() {
                                buf.extend_from_slice(&mono);
                            }
                        }
                    },
                    |err| warn!("Input stream error: {}", err),
                    None,
                ),

                SampleFormat::F32 => device.build_input_stream(
                    &config,
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        if capturing.load(Ordering::SeqCst) {
                            let as_i16: Vec<i16> =
                                data.iter().map(|&s| (s * 32767.0) as i16).collect();
                            let mono = CpalCapture::mix_to_mono(&as_i16, channels);
                            if let Ok(mut buf) = buffer.lock() {
                                buf.extend_from_slice(&mono);
                            }
                        }
                    },
                    |err| warn!("Input stream error: {}", err),
                    None,
                ),

                other => {
                    is_capturing.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(CaptureError::ConfigurationFailed(format!(
                        "Unsupported sample format: {:?}",
                        other
                    ))));
                    return;
                }
            };

            let stream = match stream_result {
                Ok(s) => s,
                Err(e) => {
                    is_capturing.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(CaptureError::StartFailed(format!(
                        "Failed to build input stream: {}",
                        e
                    ))));
                    return;
                }
            };

            if let Err(e) = stream.play() {
                is_capturing.store(false, Ordering::SeqCst);
                let _ = ready_tx.send(Err(CaptureError::StartFailed(format!(
                    "Failed to play input stream: {}",
                    e
                ))));
                return;
            }

            let _ = ready_tx.send(Ok(()));

            while is_capturing.load(Ordering::SeqCst) {
                std::thread::sleep(std::time::Duration::from_millis(100));
            }

            drop(stream);
        });

        match ready_rx.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                self.is_capturing.store(false, Ordering::SeqCst);
                Err(e)
            }
            Err(_) => {
                self.is_capturing.store(false, Ordering::SeqCst);
                Err(CaptureError::StartFailed(
                    "Capture thread exited before the stream came up".into(),
                ))
            }
        }
    }

    async fn stop(&self) -> Result<String, CaptureError> {
        if !self.is_capturing.load(Ordering::SeqCst) {
            return Err(CaptureError::NotCapturing);
        }

        self.is_capturing.store(false, Ordering::SeqCst);

        // Let the capture thread release the stream
        sleep(Duration::from_millis(100)).await;

        let sample_rate = self.device_sample_rate.load(Ordering::SeqCst);
        if sample_rate == 0 {
            return Err(CaptureError::CaptureFailed("Sample rate not set".into()));
        }

        let samples = {
            let mut buffer = self.sample_buffer.lock().unwrap();
            std::mem::take(&mut *buffer)
        };

        if samples.is_empty() {
            return Err(CaptureError::CaptureFailed(
                "No audio data captured".into(),
            ));
        }

        let dir = self.recordings_dir.clone();
        let path =
            tokio::task::spawn_blocking(move || Self::write_wav(&samples, sample_rate, &dir))
                .await
                .map_err(|e| CaptureError::CaptureFailed(format!("Task join error: {}", e)))??;

        Ok(path.display().to_string())
    }

    fn is_capturing(&self) -> bool {
        self.is_capturing.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_to_mono_single_channel() {
        let mono = vec![100i16, 200, 300];
        let result = CpalCapture::mix_to_mono(&mono, 1);
        assert_eq!(result, mono);
    }

    #[test]
    fn mix_to_mono_two_channels() {
        let stereo = vec![100i16, 200, 300, 400];
        let result = CpalCapture::mix_to_mono(&stereo, 2);
        assert_eq!(result, vec![150, 350]); // Average of each pair
    }

    #[test]
    fn capture_default_state() {
        let capture = CpalCapture::new("/tmp/recordings");
        assert!(!capture.is_capturing());
    }

    #[tokio::test]
    async fn start_outcome_agrees_with_capture_flag() {
        let dir = tempfile::tempdir().unwrap();
        let capture = CpalCapture::new(dir.path());

        // The bring-up handshake resolves before start returns, so the
        // result and the live flag always agree, with or without a device.
        match capture.start().await {
            Ok(()) => {
                assert!(capture.is_capturing());
                let _ = capture.stop().await;
            }
            Err(_) => assert!(!capture.is_capturing()),
        }
    }

    #[tokio::test]
    async fn stop_without_start_is_rejected() {
        let capture = CpalCapture::new("/tmp/recordings");
        let err = capture.stop().await.unwrap_err();
        assert!(matches!(err, CaptureError::NotCapturing));
    }

    #[test]
    fn write_wav_produces_readable_file() {
        let dir = tempfile::tempdir().unwrap();
        let samples = vec![0i16, 100, -100, 32000];

        let path = CpalCapture::write_wav(&samples, 44100, dir.path()).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.spec().sample_rate, 44100);
        assert_eq!(reader.len(), samples.len() as u32);
    }
}
