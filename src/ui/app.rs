//! Main application struct and eframe integration

use crate::camera::CameraProvider;
use crate::config::AppConfig;
use crate::speech::RecognitionSession;
use crate::ui::overlay::OverlayView;
use crate::ui::state::AssistantState;
use crate::ui::theme::Theme;
use egui::{CentralPanel, ColorImage, TextureHandle, TextureOptions};

/// Holovox assistant application
pub struct HolovoxApp {
    state: AssistantState,
    theme: Theme,
    video_texture: Option<TextureHandle>,
}

impl HolovoxApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &AppConfig,
        camera: Box<dyn CameraProvider>,
        session: Option<Box<dyn RecognitionSession>>,
    ) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        let constraints = (&config.camera).into();

        Self {
            state: AssistantState::new(camera, session, constraints),
            theme,
            video_texture: None,
        }
    }

    /// Upload the newest camera frame into the video texture
    fn upload_frame(&mut self, ctx: &egui::Context) {
        if !self.state.has_camera_stream() {
            self.video_texture = None;
            return;
        }

        if let Some(frame) = self.state.latest_frame() {
            let size = [frame.width as usize, frame.height as usize];
            let image = ColorImage::from_rgb(size, &frame.rgb);

            match &mut self.video_texture {
                Some(texture) => texture.set(image, TextureOptions::LINEAR),
                None => {
                    self.video_texture =
                        Some(ctx.load_texture("camera-frame", image, TextureOptions::LINEAR));
                }
            }
        }
    }
}

impl eframe::App for HolovoxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_events();
        self.upload_frame(ctx);

        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary))
            .show(ctx, |ui| {
                OverlayView::new(&mut self.state, &self.theme)
                    .video_texture(self.video_texture.as_ref())
                    .show(ui);
            });

        // Drive the overlay animations and keep polling for camera frames
        // and recognition events
        if self.state.active || self.state.listening {
            ctx.request_repaint();
        }
    }
}
