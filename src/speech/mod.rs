//! Speech recognition: validated events, the Whisper engine, and the
//! microphone-to-transcript session
//!
//! Recognition capability is injected at construction time and may be
//! absent entirely; the session trait is the seam the UI depends on.

pub mod engine;
pub mod event;
#[cfg(feature = "audio-io")]
pub mod session;

pub use engine::WhisperEngine;
pub use event::{RecognitionAlternative, RecognitionEvent, RecognitionResult};
#[cfg(feature = "audio-io")]
pub use session::WhisperSession;

use crate::Result;

/// A continuous speech recognition session
///
/// Created at most once per application lifetime; toggling listening on
/// and off reuses the same session.
pub trait RecognitionSession {
    /// Begin or resume capturing speech
    fn start(&mut self) -> Result<()>;

    /// Stop capturing, finalizing any utterance in flight
    fn stop(&mut self) -> Result<()>;

    /// Drain the next recognition event, if one is ready
    fn poll_event(&mut self) -> Option<RecognitionEvent>;
}
