use super::{CameraFrame, CameraProvider, CameraStream, StreamConstraints, StreamRequest};
use crate::HolovoxError;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};
use nokhwa::Camera;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info};

/// Webcam provider backed by nokhwa
///
/// Device access happens on a worker thread: opening a camera can block
/// for hundreds of milliseconds and must never stall the UI.
pub struct NativeCamera;

impl NativeCamera {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraProvider for NativeCamera {
    fn request_stream(&self, constraints: &StreamConstraints) -> StreamRequest {
        let constraints = constraints.clone();
        let (tx, request) = StreamRequest::pending();

        thread::spawn(move || {
            let result = open_stream(&constraints);
            if tx.send(result).is_err() {
                // The requester gave up; the stream result is dropped here
                // and any opened device is released.
                debug!("Camera request abandoned before completion");
            }
        });

        request
    }
}

fn open_stream(constraints: &StreamConstraints) -> crate::Result<CameraStream> {
    let index = CameraIndex::Index(constraints.device_index);

    let requested = match (constraints.width, constraints.height) {
        (Some(w), Some(h)) => RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
            CameraFormat::new(Resolution::new(w, h), FrameFormat::MJPEG, 30),
        )),
        _ => RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate),
    };

    let mut camera = Camera::new(index, requested)
        .map_err(|e| HolovoxError::CameraError(format!("Failed to open camera: {}", e)))?;

    camera.open_stream().map_err(|e| {
        HolovoxError::CameraError(format!("Failed to start camera stream: {}", e))
    })?;

    let resolution = camera.resolution();
    info!(
        "Camera stream open: {}x{}",
        resolution.width(),
        resolution.height()
    );

    let frame_slot = Arc::new(Mutex::new(None));
    let stop = Arc::new(AtomicBool::new(false));
    let stream = CameraStream::new(Arc::clone(&frame_slot), Arc::clone(&stop));

    thread::spawn(move || {
        capture_loop(camera, frame_slot, stop);
    });

    Ok(stream)
}

fn capture_loop(
    mut camera: Camera,
    frame_slot: Arc<Mutex<Option<CameraFrame>>>,
    stop: Arc<AtomicBool>,
) {
    while !stop.load(Ordering::Relaxed) {
        match camera.frame() {
            Ok(frame) => match frame.decode_image::<RgbFormat>() {
                Ok(decoded) => {
                    let published = CameraFrame {
                        width: decoded.width(),
                        height: decoded.height(),
                        rgb: decoded.into_raw(),
                    };
                    *frame_slot.lock() = Some(published);
                }
                Err(e) => {
                    error!("Failed to decode camera frame: {}", e);
                    thread::sleep(Duration::from_millis(50));
                }
            },
            Err(e) => {
                // Device unplugged or backend failure; the slot stops
                // updating and the last frame stays on screen.
                error!("Camera frame read failed: {}", e);
                break;
            }
        }
    }

    if let Err(e) = camera.stop_stream() {
        debug!("Error stopping camera stream: {}", e);
    }
    debug!("Camera capture loop ended");
}
