//! UI automation tests using egui_kittest and AccessKit
//!
//! These tests render the real overlay with scripted camera and speech
//! capabilities, simulate user interactions, and check the accessibility
//! tree for the expected elements.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use egui_kittest::kittest::Queryable;
use egui_kittest::Harness;
use holovox::camera::{CameraFrame, CameraProvider, CameraStream, StreamConstraints, StreamRequest};
use holovox::speech::{RecognitionEvent, RecognitionResult, RecognitionSession};
use holovox::ui::{AssistantState, OverlayView, Theme};
use holovox::HolovoxError;
use parking_lot::Mutex;

/// Camera provider that resolves every request immediately
struct InstantCamera {
    requests: Rc<Cell<usize>>,
    released: Arc<AtomicBool>,
}

impl InstantCamera {
    fn new() -> (Self, Rc<Cell<usize>>, Arc<AtomicBool>) {
        let requests = Rc::new(Cell::new(0));
        let released = Arc::new(AtomicBool::new(false));
        let camera = Self {
            requests: Rc::clone(&requests),
            released: Arc::clone(&released),
        };
        (camera, requests, released)
    }
}

impl CameraProvider for InstantCamera {
    fn request_stream(&self, _constraints: &StreamConstraints) -> StreamRequest {
        self.requests.set(self.requests.get() + 1);
        // The release flag tracks the newest stream
        self.released.store(false, Ordering::Relaxed);

        let slot = Arc::new(Mutex::new(None));
        let stream = CameraStream::new(slot, Arc::clone(&self.released));
        StreamRequest::ready(Ok(stream))
    }
}

/// Camera provider whose streams already carry one decoded frame
struct FramedCamera;

impl CameraProvider for FramedCamera {
    fn request_stream(&self, _constraints: &StreamConstraints) -> StreamRequest {
        let slot = Arc::new(Mutex::new(Some(CameraFrame {
            width: 2,
            height: 2,
            rgb: vec![0x20; 12],
        })));
        let stream = CameraStream::new(slot, Arc::new(AtomicBool::new(false)));
        StreamRequest::ready(Ok(stream))
    }
}

/// Camera provider whose requests always fail
struct FailingCamera;

impl CameraProvider for FailingCamera {
    fn request_stream(&self, _constraints: &StreamConstraints) -> StreamRequest {
        StreamRequest::ready(Err(HolovoxError::CameraError("no camera attached".into())))
    }
}

/// Shared handles into a scripted recognition session
#[derive(Clone, Default)]
struct SessionProbe {
    starts: Rc<Cell<usize>>,
    stops: Rc<Cell<usize>>,
    events: Rc<RefCell<VecDeque<RecognitionEvent>>>,
}

impl SessionProbe {
    fn push_event(&self, event: RecognitionEvent) {
        self.events.borrow_mut().push_back(event);
    }
}

/// Recognition session that counts calls and replays queued events
struct ScriptedSession {
    probe: SessionProbe,
}

impl ScriptedSession {
    fn new() -> (Self, SessionProbe) {
        let probe = SessionProbe::default();
        let session = Self {
            probe: probe.clone(),
        };
        (session, probe)
    }
}

impl RecognitionSession for ScriptedSession {
    fn start(&mut self) -> holovox::Result<()> {
        self.probe.starts.set(self.probe.starts.get() + 1);
        Ok(())
    }

    fn stop(&mut self) -> holovox::Result<()> {
        self.probe.stops.set(self.probe.stops.get() + 1);
        Ok(())
    }

    fn poll_event(&mut self) -> Option<RecognitionEvent> {
        self.probe.events.borrow_mut().pop_front()
    }
}

/// Build a recognition event with earlier finalized utterances plus the
/// current hypothesis at the changed index
fn recognition_event(previous: &[&str], current: &str, is_final: bool) -> RecognitionEvent {
    let mut results: Vec<RecognitionResult> = previous
        .iter()
        .map(|text| RecognitionResult::single(*text, true))
        .collect();
    results.push(RecognitionResult::single(current, is_final));

    RecognitionEvent::validated(results.len() - 1, results).expect("test event should validate")
}

/// Application state wrapper for testing
struct TestApp {
    state: AssistantState,
    theme: Theme,
    video_texture: Option<egui::TextureHandle>,
}

impl TestApp {
    fn new(
        camera: Box<dyn CameraProvider>,
        session: Option<Box<dyn RecognitionSession>>,
    ) -> Self {
        Self {
            state: AssistantState::new(camera, session, StreamConstraints::default()),
            theme: Theme::dark(),
            video_texture: None,
        }
    }
}

/// Render the overlay the way the application does: poll, upload the
/// newest frame, then draw
fn build_harness(app: TestApp) -> Harness<'static, TestApp> {
    Harness::builder()
        .with_size(egui::Vec2::new(480.0, 600.0))
        .build_state(
            |ctx, app: &mut TestApp| {
                app.state.poll_events();

                if !app.state.has_camera_stream() {
                    app.video_texture = None;
                } else if let Some(frame) = app.state.latest_frame() {
                    let size = [frame.width as usize, frame.height as usize];
                    let image = egui::ColorImage::from_rgb(size, &frame.rgb);
                    app.video_texture =
                        Some(ctx.load_texture("camera-frame", image, egui::TextureOptions::LINEAR));
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    OverlayView::new(&mut app.state, &app.theme)
                        .video_texture(app.video_texture.as_ref())
                        .show(ui);
                });
            },
            app,
        )
}

/// Test that only the power control is present before activation
#[test]
fn test_power_control_present_when_idle() {
    let (camera, _requests, _released) = InstantCamera::new();
    let (session, _probe) = ScriptedSession::new();
    let mut harness = build_harness(TestApp::new(Box::new(camera), Some(Box::new(session))));

    harness.run();

    let _power = harness.get_by_label("Toggle assistant power");
    assert!(
        harness.query_by_label("Toggle voice capture").is_none(),
        "Capture control should be hidden while inactive"
    );
    assert!(
        harness.query_by_label("Assistant hologram").is_none(),
        "Hologram should be hidden while inactive"
    );
}

/// Test that powering on reveals the capture control and hologram
#[test]
fn test_activation_reveals_capture_control() {
    let (camera, _requests, _released) = InstantCamera::new();
    let (session, _probe) = ScriptedSession::new();
    let mut harness = build_harness(TestApp::new(Box::new(camera), Some(Box::new(session))));

    harness.run();
    harness.get_by_label("Toggle assistant power").click();
    harness.run();

    assert!(harness.state().state.active, "Assistant should be active");
    let _capture = harness.get_by_label("Toggle voice capture");
    let _hologram = harness.get_by_label("Assistant hologram");
}

/// Test that powering off hides the capture control again
#[test]
fn test_deactivation_hides_capture_control() {
    let (camera, _requests, _released) = InstantCamera::new();
    let (session, _probe) = ScriptedSession::new();
    let mut harness = build_harness(TestApp::new(Box::new(camera), Some(Box::new(session))));

    harness.run();
    harness.get_by_label("Toggle assistant power").click();
    harness.run();
    harness.get_by_label("Toggle assistant power").click();
    harness.run();

    assert!(!harness.state().state.active);
    assert!(harness.query_by_label("Toggle voice capture").is_none());
}

/// Test that power toggles never touch the listening flag
#[test]
fn test_power_leaves_listening_flag_alone() {
    let (camera, _requests, released) = InstantCamera::new();
    let (session, probe) = ScriptedSession::new();
    let mut harness = build_harness(TestApp::new(Box::new(camera), Some(Box::new(session))));

    harness.run();
    harness.get_by_label("Toggle assistant power").click();
    harness.run();
    harness.get_by_label("Toggle voice capture").click();
    harness.run();
    assert!(harness.state().state.listening);

    // Power off while still listening
    harness.get_by_label("Toggle assistant power").click();
    harness.run();

    assert!(!harness.state().state.active);
    assert!(
        harness.state().state.listening,
        "Listening flag should survive deactivation"
    );
    assert!(
        released.load(Ordering::Relaxed),
        "Camera stream should be released on power off"
    );
    assert_eq!(probe.stops.get(), 0, "Power off should not stop the session");

    // Power back on: the capture control returns, still listening
    harness.get_by_label("Toggle assistant power").click();
    harness.run();
    let _capture = harness.get_by_label("Toggle voice capture");
    assert!(harness.state().state.listening);
}

/// Test that each activation issues exactly one camera request
#[test]
fn test_activation_requests_camera_once() {
    let (camera, requests, _released) = InstantCamera::new();
    let mut harness = build_harness(TestApp::new(Box::new(camera), None));

    harness.run();
    assert_eq!(requests.get(), 0);

    harness.get_by_label("Toggle assistant power").click();
    harness.run();
    assert_eq!(requests.get(), 1);

    // More frames must not request again
    harness.run();
    harness.run();
    assert_eq!(requests.get(), 1);

    harness.get_by_label("Toggle assistant power").click();
    harness.run();
    harness.get_by_label("Toggle assistant power").click();
    harness.run();
    assert_eq!(requests.get(), 2, "One request per activation");
}

/// Test that a failing camera leaves the assistant active with no notice
#[test]
fn test_camera_failure_keeps_assistant_active() {
    let (session, _probe) = ScriptedSession::new();
    let mut harness = build_harness(TestApp::new(Box::new(FailingCamera), Some(Box::new(session))));

    harness.run();
    harness.get_by_label("Toggle assistant power").click();
    harness.run();
    harness.run();

    assert!(
        harness.state().state.active,
        "Camera failure should not deactivate the assistant"
    );
    assert!(
        harness.state().state.notice.is_none(),
        "Camera failure should not raise a notice"
    );
    let _hologram = harness.get_by_label("Assistant hologram");
}

/// Test that the camera feed renders only while active
#[test]
fn test_camera_feed_renders_only_while_active() {
    let (session, _probe) = ScriptedSession::new();
    let mut harness = build_harness(TestApp::new(Box::new(FramedCamera), Some(Box::new(session))));

    harness.run();
    assert!(
        harness.query_by_label("Camera feed").is_none(),
        "Feed should be hidden while inactive"
    );

    harness.get_by_label("Toggle assistant power").click();
    harness.run();
    // The stream attaches on the next poll and the frame uploads with it
    harness.run();
    let _feed = harness.get_by_label("Camera feed");

    harness.get_by_label("Toggle assistant power").click();
    harness.run();
    harness.run();
    assert!(
        harness.query_by_label("Camera feed").is_none(),
        "Feed should disappear on power off"
    );
}

/// Test that the transcript panel appears once text arrives
#[test]
fn test_transcript_panel_appears_with_text() {
    let (camera, _requests, _released) = InstantCamera::new();
    let (session, probe) = ScriptedSession::new();
    let mut harness = build_harness(TestApp::new(Box::new(camera), Some(Box::new(session))));

    harness.run();
    assert!(harness.query_by_label("Transcript: hello world").is_none());

    harness.get_by_label("Toggle assistant power").click();
    harness.run();

    probe.push_event(recognition_event(&[], "hello world", false));
    harness.run();

    let _panel = harness.get_by_label("Transcript: hello world");
}

/// Test that each recognition update replaces the transcript text
#[test]
fn test_transcript_replaced_not_appended() {
    let (camera, _requests, _released) = InstantCamera::new();
    let (session, probe) = ScriptedSession::new();
    let mut harness = build_harness(TestApp::new(Box::new(camera), Some(Box::new(session))));

    harness.run();
    harness.get_by_label("Toggle assistant power").click();
    harness.run();

    probe.push_event(recognition_event(&[], "hello", false));
    harness.run();
    let _first = harness.get_by_label("Transcript: hello");

    // The same utterance revised at the same result index
    probe.push_event(recognition_event(&[], "hello there", false));
    harness.run();
    let _revised = harness.get_by_label("Transcript: hello there");
    assert!(harness.query_by_label("Transcript: hello").is_none());

    // A new utterance: the indexed text replaces, never appends
    probe.push_event(recognition_event(&["hello there"], "general kenobi", true));
    harness.run();
    let _second = harness.get_by_label("Transcript: general kenobi");
    assert!(harness
        .query_by_label("Transcript: hello there general kenobi")
        .is_none());
    assert!(harness.query_by_label("Transcript: hello there").is_none());
}

/// Test that requesting capture without speech support raises a notice
#[test]
fn test_missing_speech_support_raises_notice() {
    let (camera, _requests, _released) = InstantCamera::new();
    let mut harness = build_harness(TestApp::new(Box::new(camera), None));

    harness.run();
    harness.get_by_label("Toggle assistant power").click();
    harness.run();
    harness.get_by_label("Toggle voice capture").click();
    harness.run();

    let _notice =
        harness.get_by_label("Notice: Speech recognition is not supported on this system");
    assert!(
        !harness.state().state.listening,
        "Listening flag should stay off without speech support"
    );

    harness.get_by_label("Dismiss notice").click();
    harness.run();

    assert!(harness.state().state.notice.is_none());
    assert!(harness
        .query_by_label("Notice: Speech recognition is not supported on this system")
        .is_none());
}

/// Test that the controls ignore input while a notice is up
#[test]
fn test_notice_blocks_power_control() {
    let (camera, _requests, _released) = InstantCamera::new();
    let mut harness = build_harness(TestApp::new(Box::new(camera), None));

    harness.run();
    harness.get_by_label("Toggle assistant power").click();
    harness.run();
    harness.get_by_label("Toggle voice capture").click();
    harness.run();
    assert!(harness.state().state.notice.is_some());

    harness.get_by_label("Toggle assistant power").click();
    harness.run();
    assert!(
        harness.state().state.active,
        "Power control should be inert while the notice is up"
    );

    harness.get_by_label("Dismiss notice").click();
    harness.run();
    harness.get_by_label("Toggle assistant power").click();
    harness.run();
    assert!(!harness.state().state.active);
}

/// Full flow: power on, capture, transcribe, stop, power off
#[test]
fn test_full_assistant_flow() {
    let (camera, requests, released) = InstantCamera::new();
    let (session, probe) = ScriptedSession::new();
    let mut harness = build_harness(TestApp::new(Box::new(camera), Some(Box::new(session))));

    harness.run();

    // Power on: camera requested once, controls appear
    harness.get_by_label("Toggle assistant power").click();
    harness.run();
    assert_eq!(requests.get(), 1);

    // Start capture
    harness.get_by_label("Toggle voice capture").click();
    harness.run();
    assert!(harness.state().state.listening);
    assert_eq!(probe.starts.get(), 1);

    // Words arrive and get revised
    probe.push_event(recognition_event(&[], "turn on the lights", false));
    harness.run();
    probe.push_event(recognition_event(&[], "turn on the lights please", true));
    harness.run();
    let _panel = harness.get_by_label("Transcript: turn on the lights please");

    // Stop capture
    harness.get_by_label("Toggle voice capture").click();
    harness.run();
    assert!(!harness.state().state.listening);
    assert_eq!(probe.stops.get(), 1);

    // Power off: camera released, transcript text survives
    harness.get_by_label("Toggle assistant power").click();
    harness.run();
    assert!(!harness.state().state.active);
    assert!(released.load(Ordering::Relaxed));
    assert!(harness.query_by_label("Toggle voice capture").is_none());
    let _kept = harness.get_by_label("Transcript: turn on the lights please");

    assert_eq!(probe.starts.get(), 1);
    assert_eq!(probe.stops.get(), 1);
}
