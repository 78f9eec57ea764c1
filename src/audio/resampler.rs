use crate::{HolovoxError, Result};
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use tracing::debug;

/// Frames consumed per resampler call
const CHUNK_FRAMES: usize = 1024;

/// Streaming mono resampler with an input carry
///
/// `SincFixedIn` consumes fixed-size chunks, while capture callbacks
/// deliver arbitrary lengths. Partial chunks are carried over to the next
/// call instead of being zero-padded, which would insert silence gaps into
/// the middle of an utterance.
pub struct StreamResampler {
    resampler: SincFixedIn<f32>,
    carry: Vec<f32>,
    input_rate: u32,
    output_rate: u32,
}

impl StreamResampler {
    /// Create a resampler converting `input_rate` to `output_rate`
    pub fn new(input_rate: u32, output_rate: u32) -> Result<Self> {
        if input_rate == 0 || output_rate == 0 {
            return Err(HolovoxError::ConfigError(
                "Sample rates must be greater than 0".into(),
            ));
        }

        let resample_ratio = output_rate as f64 / input_rate as f64;

        let params = SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        };

        let resampler = SincFixedIn::<f32>::new(resample_ratio, 2.0, params, CHUNK_FRAMES, 1)
            .map_err(|e| {
                HolovoxError::AudioProcessingError(format!("Failed to create resampler: {}", e))
            })?;

        debug!("Created resampler: {} Hz -> {} Hz", input_rate, output_rate);

        Ok(Self {
            resampler,
            carry: Vec::new(),
            input_rate,
            output_rate,
        })
    }

    /// Push captured samples, returning the output of every full chunk
    ///
    /// Samples short of a full chunk stay carried until the next push or a
    /// [`flush`](Self::flush).
    pub fn push(&mut self, input: &[f32]) -> Result<Vec<f32>> {
        if self.input_rate == self.output_rate {
            return Ok(input.to_vec());
        }

        self.carry.extend_from_slice(input);

        let mut output = Vec::new();
        while self.carry.len() >= CHUNK_FRAMES {
            let chunk: Vec<f32> = self.carry.drain(..CHUNK_FRAMES).collect();
            let processed = self.resampler.process(&[chunk], None).map_err(|e| {
                HolovoxError::AudioProcessingError(format!("Resampling failed: {}", e))
            })?;
            output.extend_from_slice(&processed[0]);
        }

        Ok(output)
    }

    /// Drain the carried remainder, zero-padding the final chunk
    pub fn flush(&mut self) -> Result<Vec<f32>> {
        if self.input_rate == self.output_rate || self.carry.is_empty() {
            return Ok(Vec::new());
        }

        let consumed = self.carry.len();
        let mut chunk = std::mem::take(&mut self.carry);
        chunk.resize(CHUNK_FRAMES, 0.0);

        let processed = self
            .resampler
            .process(&[chunk], None)
            .map_err(|e| HolovoxError::AudioProcessingError(format!("Resampling failed: {}", e)))?;

        // Only the portion corresponding to real input is kept
        let ratio = self.output_rate as f64 / self.input_rate as f64;
        let keep = ((consumed as f64) * ratio).ceil() as usize;

        let mut output = processed.into_iter().next().unwrap_or_default();
        output.truncate(keep.min(output.len()));
        Ok(output)
    }

    /// Get the input sample rate
    pub fn input_rate(&self) -> u32 {
        self.input_rate
    }

    /// Get the output sample rate
    pub fn output_rate(&self) -> u32 {
        self.output_rate
    }

    /// Reset the resampler state and drop any carried samples
    pub fn reset(&mut self) {
        self.carry.clear();
        self.resampler.reset();
    }
}
