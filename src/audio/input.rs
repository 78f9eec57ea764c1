use crate::audio::SampleBuffer;
use crate::{HolovoxError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Microphone capture feeding the recognition pipeline
///
/// Multi-channel input is mixed down to mono in the callback; samples land
/// in a shared [`SampleBuffer`] at the device's native rate.
pub struct MicrophoneInput {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
    is_capturing: Arc<Mutex<bool>>,
}

impl MicrophoneInput {
    /// Create a new input backed by the default input device
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or_else(|| HolovoxError::AudioDeviceError("No input device available".into()))?;

        info!(
            "Using input device: {}",
            device.name().unwrap_or_else(|_| "Unknown".to_string())
        );

        let config = device
            .default_input_config()
            .map_err(|e| {
                HolovoxError::AudioDeviceError(format!("Failed to get input config: {}", e))
            })?
            .into();

        Ok(Self {
            device,
            config,
            stream: None,
            is_capturing: Arc::new(Mutex::new(false)),
        })
    }

    /// Get the sample rate of the input device
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    /// Get the number of channels
    pub fn channels(&self) -> u16 {
        self.config.channels
    }

    /// Start capturing audio into the provided buffer
    pub fn start_capture(&mut self, buffer: SampleBuffer) -> Result<()> {
        if *self.is_capturing.lock() {
            warn!("Already capturing");
            return Ok(());
        }

        let channels = self.config.channels as usize;
        let is_capturing = Arc::clone(&self.is_capturing);

        let err_fn = |err| {
            error!("Audio input stream error: {}", err);
        };

        let stream = self
            .device
            .build_input_stream(
                &self.config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if !*is_capturing.lock() {
                        return;
                    }

                    // Convert to mono if necessary
                    if channels == 1 {
                        buffer.write(data);
                    } else {
                        let mono: Vec<f32> = data
                            .chunks(channels)
                            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
                            .collect();
                        buffer.write(&mono);
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| {
                HolovoxError::AudioDeviceError(format!("Failed to build input stream: {}", e))
            })?;

        stream.play().map_err(|e| {
            HolovoxError::AudioDeviceError(format!("Failed to start input stream: {}", e))
        })?;

        *self.is_capturing.lock() = true;
        self.stream = Some(stream);

        info!("Started microphone capture");
        Ok(())
    }

    /// Stop capturing audio
    pub fn stop_capture(&mut self) -> Result<()> {
        *self.is_capturing.lock() = false;

        if let Some(stream) = self.stream.take() {
            drop(stream);
            info!("Stopped microphone capture");
        }

        Ok(())
    }

    /// Check if currently capturing
    pub fn is_capturing(&self) -> bool {
        *self.is_capturing.lock()
    }
}

impl Drop for MicrophoneInput {
    fn drop(&mut self) {
        let _ = self.stop_capture();
    }
}
