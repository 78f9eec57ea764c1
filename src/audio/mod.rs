//! Audio capture and preprocessing for the recognition pipeline

pub mod buffer;
#[cfg(feature = "audio-io")]
pub mod input;
pub mod resampler;
pub mod vad;

pub use buffer::SampleBuffer;
#[cfg(feature = "audio-io")]
pub use input::MicrophoneInput;
pub use resampler::StreamResampler;
pub use vad::SpeechDetector;

/// Sample rate expected by the recognition engine
pub const TARGET_RATE: u32 = 16_000;
