//! Whisper speech-to-text engine

use crate::audio::TARGET_RATE;
use crate::config::SpeechSettings;
use crate::{HolovoxError, Result};
use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

/// Whisper model wrapper that turns mono 16 kHz audio into text
pub struct WhisperEngine {
    settings: SpeechSettings,
    context: WhisperContext,
}

impl WhisperEngine {
    /// Load the model file and prepare an engine
    pub fn new(settings: SpeechSettings) -> Result<Self> {
        info!("Loading Whisper model from: {:?}", settings.model_path);

        if !settings.model_path.exists() {
            return Err(HolovoxError::ModelLoadError(format!(
                "Model file not found: {:?}",
                settings.model_path
            )));
        }

        let context = WhisperContext::new_with_params(
            settings
                .model_path
                .to_str()
                .ok_or_else(|| HolovoxError::ModelLoadError("Invalid model path".to_string()))?,
            WhisperContextParameters::default(),
        )
        .map_err(|e| {
            HolovoxError::ModelLoadError(format!("Failed to load Whisper model: {:?}", e))
        })?;

        info!("Whisper model loaded successfully");

        Ok(Self { settings, context })
    }

    /// Transcribe a buffer of mono 16 kHz samples
    pub fn transcribe(&self, samples: &[f32]) -> Result<String> {
        if samples.is_empty() {
            return Err(HolovoxError::TranscriptionError(
                "Empty audio segment".to_string(),
            ));
        }

        debug!(
            "Transcribing audio segment: {} samples, {:.2}s duration",
            samples.len(),
            samples.len() as f64 / TARGET_RATE as f64
        );

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });

        params.set_n_threads(self.settings.n_threads);
        params.set_translate(self.settings.translate);
        params.set_print_timestamps(false);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);

        if let Some(ref lang) = self.settings.language {
            params.set_language(Some(lang));
        }

        // Each pass gets a fresh state so repeated transcriptions of the
        // same growing utterance do not contaminate each other
        let mut state = self.context.create_state().map_err(|e| {
            HolovoxError::TranscriptionError(format!("Failed to create state: {:?}", e))
        })?;

        state.full(params, samples).map_err(|e| {
            HolovoxError::TranscriptionError(format!("Transcription failed: {:?}", e))
        })?;

        let num_segments = state.full_n_segments().map_err(|e| {
            HolovoxError::TranscriptionError(format!("Failed to get segments: {:?}", e))
        })?;

        let mut text = String::new();
        for i in 0..num_segments {
            let segment_text = state.full_get_segment_text(i).map_err(|e| {
                HolovoxError::TranscriptionError(format!("Failed to get segment text: {:?}", e))
            })?;
            text.push_str(&segment_text);
        }

        let text = text.trim().to_string();
        debug!("Transcription result: '{}'", text);

        Ok(text)
    }
}
