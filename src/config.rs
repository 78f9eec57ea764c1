//! Application configuration
//!
//! Settings are read from a JSON file in the platform configuration
//! directory. A missing or malformed file falls back to defaults, and the
//! defaults are written back on first run so users have a file to edit.

use crate::{HolovoxError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Camera capture settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Camera device index (0 is the system default camera)
    pub device_index: u32,

    /// Preferred capture width in pixels (None lets the device choose)
    pub width: Option<u32>,

    /// Preferred capture height in pixels (None lets the device choose)
    pub height: Option<u32>,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            device_index: 0,
            width: None,
            height: None,
        }
    }
}

/// Speech recognition settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    /// Path to the Whisper model file
    pub model_path: PathBuf,

    /// Language to transcribe (None for auto-detection)
    pub language: Option<String>,

    /// Number of threads to use for transcription
    pub n_threads: i32,

    /// Enable translation to English
    pub translate: bool,

    /// Speech probability threshold for the voice activity detector (0.0-1.0)
    pub vad_threshold: f32,

    /// Minimum speech segment duration in seconds
    pub min_segment_duration: f32,

    /// Maximum speech segment duration in seconds
    pub max_segment_duration: f32,

    /// Silence duration that finalizes an utterance (seconds)
    pub silence_threshold: f32,

    /// How often the live hypothesis is re-transcribed while speaking (ms)
    pub interim_interval_ms: u64,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/ggml-base.en.bin"),
            language: Some("en".to_string()),
            n_threads: 4,
            translate: false,
            vad_threshold: 0.5,
            min_segment_duration: 0.5,
            max_segment_duration: 30.0,
            silence_threshold: 0.5,
            interim_interval_ms: 900,
        }
    }
}

/// Window settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Initial window width in logical pixels
    pub window_width: f32,

    /// Initial window height in logical pixels
    pub window_height: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            window_width: 960.0,
            window_height: 640.0,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub camera: CameraSettings,
    pub speech: SpeechSettings,
    pub ui: UiSettings,
}

impl AppConfig {
    /// Default location of the configuration file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("holovox").join("config.json"))
    }

    /// Load configuration from the given path
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| HolovoxError::ConfigError(format!("Failed to read {:?}: {}", path, e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| HolovoxError::ConfigError(format!("Failed to parse {:?}: {}", path, e)))
    }

    /// Save configuration to the given path, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| HolovoxError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, contents)?;
        Ok(())
    }

    /// Load the configuration from the default location, falling back to
    /// defaults when the file is missing or malformed
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            warn!("No configuration directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            let config = Self::default();
            match config.save(&path) {
                Ok(()) => info!("Wrote default configuration to {:?}", path),
                Err(e) => warn!("Failed to write default configuration: {}", e),
            }
            return config;
        }

        match Self::load(&path) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", path);
                config
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }
}
