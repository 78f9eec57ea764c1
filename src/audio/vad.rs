use crate::{HolovoxError, Result};
use tracing::info;
use voice_activity_detector::VoiceActivityDetector;

/// Silero-based speech detector used to segment utterances
pub struct SpeechDetector {
    detector: VoiceActivityDetector,
    threshold: f32,
}

impl SpeechDetector {
    /// Create a new detector
    ///
    /// # Arguments
    /// * `sample_rate` - Sample rate of the audio (8000 or 16000)
    /// * `threshold` - Probability threshold for speech detection (0.0-1.0)
    pub fn new(sample_rate: u32, threshold: f32) -> Result<Self> {
        if ![8000, 16000].contains(&sample_rate) {
            return Err(HolovoxError::ConfigError(format!(
                "Invalid sample rate: {}. Must be 8000 or 16000",
                sample_rate
            )));
        }

        // 32ms chunks: 256 samples at 8kHz, 512 at 16kHz
        let chunk_size: usize = match sample_rate {
            8000 => 256,
            _ => 512,
        };

        let detector = VoiceActivityDetector::builder()
            .sample_rate(sample_rate as i32)
            .chunk_size(chunk_size)
            .build()
            .map_err(|e| {
                HolovoxError::AudioProcessingError(format!("Failed to create VAD: {:?}", e))
            })?;

        info!(
            "Initialized VAD with sample rate: {}, threshold: {}",
            sample_rate, threshold
        );

        Ok(Self {
            detector,
            threshold: threshold.clamp(0.0, 1.0),
        })
    }

    /// Detect whether the audio chunk contains speech
    pub fn is_speech(&mut self, samples: &[f32]) -> bool {
        self.probability(samples) >= self.threshold
    }

    /// Get the speech probability for the audio chunk (0.0-1.0)
    pub fn probability(&mut self, samples: &[f32]) -> f32 {
        self.detector.predict(samples.iter().copied())
    }

    /// Reset the detector session state
    pub fn reset(&mut self) {
        self.detector.reset();
    }

    /// Get the current threshold
    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detector_creation() {
        let vad = SpeechDetector::new(16000, 0.5);
        assert!(vad.is_ok());
    }

    #[test]
    fn test_invalid_sample_rate() {
        let vad = SpeechDetector::new(44100, 0.5);
        assert!(vad.is_err());
    }

    #[test]
    fn test_threshold_is_clamped() {
        if let Ok(vad) = SpeechDetector::new(16000, 1.5) {
            assert_eq!(vad.threshold(), 1.0);
        }
    }

    #[test]
    fn test_silence_detection() {
        if let Ok(mut vad) = SpeechDetector::new(16000, 0.5) {
            let silence = vec![0.0f32; 512];
            // Silence should not be detected as speech
            assert!(!vad.is_speech(&silence));
        }
    }
}
