//! Central assistant state
//!
//! Holds the activation and listening flags, the live transcript, and the
//! capability handles the UI drives. Camera and speech capabilities are
//! injected at construction so the state machine can run against real
//! devices or test doubles alike.

use crate::camera::{CameraFrame, CameraProvider, CameraStream, StreamConstraints, StreamRequest};
use crate::speech::{RecognitionEvent, RecognitionSession};
use tracing::{debug, error, info, warn};

/// Central application state
pub struct AssistantState {
    /// Whether the assistant is powered on
    pub active: bool,

    /// Whether voice capture is on
    ///
    /// Deactivating the assistant leaves this flag alone: capture state is
    /// owned by the listening toggle, not by power.
    pub listening: bool,

    /// Latest transcript text; each recognition update replaces it whole
    pub transcript: String,

    /// Blocking notice to show the user, if any
    pub notice: Option<String>,

    constraints: StreamConstraints,
    camera: Box<dyn CameraProvider>,
    session: Option<Box<dyn RecognitionSession>>,
    pending_stream: Option<StreamRequest>,
    stream: Option<CameraStream>,
}

impl AssistantState {
    /// Create the state with its injected capabilities
    ///
    /// `session` is `None` when speech recognition is unavailable on this
    /// system; the listening toggle then raises a notice instead.
    pub fn new(
        camera: Box<dyn CameraProvider>,
        session: Option<Box<dyn RecognitionSession>>,
        constraints: StreamConstraints,
    ) -> Self {
        Self {
            active: false,
            listening: false,
            transcript: String::new(),
            notice: None,
            constraints,
            camera,
            session,
            pending_stream: None,
            stream: None,
        }
    }

    /// Toggle the assistant on or off
    ///
    /// Powering on issues exactly one camera stream request; powering off
    /// drops the stream (and any request still in flight), which releases
    /// the device.
    pub fn toggle_active(&mut self) {
        self.active = !self.active;

        if self.active {
            info!("Assistant activated");
            self.pending_stream = Some(self.camera.request_stream(&self.constraints));
        } else {
            info!("Assistant deactivated");
            self.pending_stream = None;
            self.stream = None;
        }
    }

    /// Toggle voice capture on or off
    ///
    /// Without a recognition session this raises a notice and leaves the
    /// flag untouched. With one, the flag flips and the session is told to
    /// start or stop; a session error is logged but does not undo the flip.
    pub fn toggle_listening(&mut self) {
        let Some(session) = self.session.as_mut() else {
            warn!("Speech recognition unavailable, raising notice");
            self.notice = Some("Speech recognition is not supported on this system".to_string());
            return;
        };

        self.listening = !self.listening;

        if self.listening {
            info!("Listening started");
            if let Err(e) = session.start() {
                warn!("Failed to start recognition: {}", e);
            }
        } else {
            info!("Listening stopped");
            if let Err(e) = session.stop() {
                warn!("Failed to stop recognition: {}", e);
            }
        }
    }

    /// Process pending camera and recognition events
    ///
    /// Called once per frame. A failed camera request is logged and
    /// otherwise ignored; the assistant stays active without video.
    pub fn poll_events(&mut self) {
        if let Some(request) = &self.pending_stream {
            match request.poll() {
                Some(Ok(stream)) => {
                    info!("Camera stream attached");
                    self.stream = Some(stream);
                    self.pending_stream = None;
                }
                Some(Err(e)) => {
                    error!("Error accessing webcam: {}", e);
                    self.pending_stream = None;
                }
                None => {}
            }
        }

        // Collect first, then apply, so the session borrow ends before the
        // transcript is touched
        let mut events = Vec::new();
        if let Some(session) = self.session.as_mut() {
            while let Some(event) = session.poll_event() {
                events.push(event);
            }
        }
        for event in events {
            self.apply_recognition(event);
        }
    }

    /// Apply one recognition update, replacing the transcript text
    pub fn apply_recognition(&mut self, event: RecognitionEvent) {
        match event.transcript() {
            Some(text) => {
                debug!("Transcript updated: '{}'", text);
                self.transcript = text.to_string();
            }
            None => warn!("Ignoring malformed recognition event"),
        }
    }

    /// Clear the blocking notice
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Whether speech recognition is available
    pub fn speech_supported(&self) -> bool {
        self.session.is_some()
    }

    /// Whether a camera stream is currently attached
    pub fn has_camera_stream(&self) -> bool {
        self.stream.is_some()
    }

    /// Grab the newest camera frame, if one arrived since the last call
    pub fn latest_frame(&self) -> Option<CameraFrame> {
        self.stream.as_ref().and_then(|s| s.latest_frame())
    }
}
