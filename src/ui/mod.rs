//! GUI implementation with egui/eframe
//!
//! This module provides the desktop overlay for the assistant using the
//! eframe framework.

mod app;
mod components;
mod overlay;
mod state;
mod theme;

pub use app::HolovoxApp;
pub use overlay::OverlayView;
pub use state::AssistantState;
pub use theme::Theme;

use crate::camera::CameraProvider;
use crate::config::AppConfig;
use crate::speech::RecognitionSession;

/// Run the assistant application
pub fn run(
    config: AppConfig,
    camera: Box<dyn CameraProvider>,
    session: Option<Box<dyn RecognitionSession>>,
) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_min_inner_size([480.0, 360.0])
            .with_title("Holovox Assistant"),
        ..Default::default()
    };

    eframe::run_native(
        "Holovox",
        options,
        Box::new(move |cc| Ok(Box::new(HolovoxApp::new(cc, &config, camera, session)))),
    )
}
