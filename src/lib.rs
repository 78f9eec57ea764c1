pub mod audio;
pub mod camera;
pub mod config;
pub mod speech;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum HolovoxError {
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    #[error("Camera error: {0}")]
    CameraError(String),

    #[error("Model load error: {0}")]
    ModelLoadError(String),

    #[error("Transcription error: {0}")]
    TranscriptionError(String),

    #[error("Audio processing error: {0}")]
    AudioProcessingError(String),

    #[error("Malformed recognition event: {0}")]
    MalformedEvent(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),
}

impl From<std::io::Error> for HolovoxError {
    fn from(e: std::io::Error) -> Self {
        HolovoxError::IOError(e.to_string())
    }
}

impl HolovoxError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Hardware/device errors may require user intervention
            HolovoxError::AudioDeviceError(_) => false,
            // The assistant keeps running without a picture
            HolovoxError::CameraError(_) => true,
            // Model errors require restarting
            HolovoxError::ModelLoadError(_) => false,
            // These are typically transient errors
            HolovoxError::TranscriptionError(_) => true,
            HolovoxError::AudioProcessingError(_) => true,
            // A bad event is dropped and the stream continues
            HolovoxError::MalformedEvent(_) => true,
            HolovoxError::IOError(_) => false,
            HolovoxError::ConfigError(_) => false,
            HolovoxError::ChannelError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            HolovoxError::AudioDeviceError(_) => {
                "Audio device error. Please check your microphone.".to_string()
            }
            HolovoxError::CameraError(_) => {
                "Camera unavailable. Please check your webcam connection.".to_string()
            }
            HolovoxError::ModelLoadError(_) => {
                "Failed to load the speech model. Please verify model files are present.".to_string()
            }
            HolovoxError::TranscriptionError(_) => {
                "Speech recognition failed. Please try again.".to_string()
            }
            HolovoxError::AudioProcessingError(_) => {
                "Audio processing failed. Please try again.".to_string()
            }
            HolovoxError::MalformedEvent(_) => {
                "Received an invalid recognition result.".to_string()
            }
            HolovoxError::IOError(_) => "File system error occurred.".to_string(),
            HolovoxError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            HolovoxError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, HolovoxError>;
