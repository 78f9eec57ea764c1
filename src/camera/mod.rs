//! Camera capture behind an injectable provider seam
//!
//! Acquisition is asynchronous: [`CameraProvider::request_stream`] returns
//! immediately with a [`StreamRequest`] that the UI polls once per frame.
//! The resolved [`CameraStream`] releases the device when dropped.

use crate::{HolovoxError, Result};
use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

#[cfg(feature = "camera-io")]
pub mod native;
#[cfg(feature = "camera-io")]
pub use native::NativeCamera;

/// Requested capture parameters
///
/// The default asks for the system's default camera at whatever format the
/// device prefers.
#[derive(Debug, Clone, Default)]
pub struct StreamConstraints {
    /// Camera device index (0 is the system default)
    pub device_index: u32,
    /// Preferred capture width in pixels
    pub width: Option<u32>,
    /// Preferred capture height in pixels
    pub height: Option<u32>,
}

impl From<&crate::config::CameraSettings> for StreamConstraints {
    fn from(settings: &crate::config::CameraSettings) -> Self {
        Self {
            device_index: settings.device_index,
            width: settings.width,
            height: settings.height,
        }
    }
}

/// A single decoded camera frame, tightly packed RGB8
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

/// Handle to a live camera stream
///
/// The capture side publishes the newest frame into a shared slot and the
/// UI takes it once per repaint; frames that were never displayed are
/// simply overwritten. Dropping the handle signals the capture side to
/// stop and release the device.
pub struct CameraStream {
    frame_slot: Arc<Mutex<Option<CameraFrame>>>,
    stop: Arc<AtomicBool>,
}

impl CameraStream {
    pub fn new(frame_slot: Arc<Mutex<Option<CameraFrame>>>, stop: Arc<AtomicBool>) -> Self {
        Self { frame_slot, stop }
    }

    /// Take the newest frame published since the last call
    pub fn latest_frame(&self) -> Option<CameraFrame> {
        self.frame_slot.lock().take()
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        debug!("Camera stream released");
    }
}

/// An in-flight stream acquisition
pub struct StreamRequest {
    rx: Receiver<Result<CameraStream>>,
}

impl StreamRequest {
    /// Create a request resolved later by a background worker
    pub fn pending() -> (Sender<Result<CameraStream>>, Self) {
        let (tx, rx) = bounded(1);
        (tx, Self { rx })
    }

    /// Create an already-resolved request
    pub fn ready(result: Result<CameraStream>) -> Self {
        let (tx, request) = Self::pending();
        let _ = tx.send(result);
        request
    }

    /// Poll for completion without blocking
    pub fn poll(&self) -> Option<Result<CameraStream>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(HolovoxError::CameraError(
                "Camera worker disappeared".into(),
            ))),
        }
    }
}

/// Provider seam for camera acquisition
pub trait CameraProvider {
    /// Begin acquiring a stream; the result arrives through the request
    fn request_stream(&self, constraints: &StreamConstraints) -> StreamRequest;
}

/// Provider used when the crate is built without camera support
///
/// Requests resolve to an error, which the assistant treats like any other
/// camera failure: it stays active without a picture.
#[cfg(not(feature = "camera-io"))]
pub struct NullCamera;

#[cfg(not(feature = "camera-io"))]
impl CameraProvider for NullCamera {
    fn request_stream(&self, _constraints: &StreamConstraints) -> StreamRequest {
        tracing::warn!("Camera capture disabled at build time");
        StreamRequest::ready(Err(HolovoxError::CameraError(
            "Camera support not compiled in".into(),
        )))
    }
}
