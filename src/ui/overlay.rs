//! Overlay composition
//!
//! Layers the whole assistant view inside one panel: camera feed, framing
//! gradient bands, hologram rings, transcript panel, control bar, and the
//! blocking notice on top. The same view drives the app and the UI tests.

use crate::ui::components::{
    ControlBar, HologramFigure, NoticeDialog, TranscriptPanel, VideoSurface,
};
use crate::ui::state::AssistantState;
use crate::ui::theme::Theme;
use egui::{Color32, Pos2, Rect, TextureHandle, UiBuilder, Vec2};

const CONTROL_STRIP_HEIGHT: f32 = 84.0;
const BAND_HEIGHT: f32 = 80.0;
const HOLOGRAM_EXTENT: f32 = 200.0;
const TRANSCRIPT_TOP_MARGIN: f32 = 32.0;
const TRANSCRIPT_MAX_WIDTH: f32 = 672.0;
const TRANSCRIPT_HEIGHT: f32 = 72.0;

/// Full assistant overlay
pub struct OverlayView<'a> {
    state: &'a mut AssistantState,
    theme: &'a Theme,
    video_texture: Option<&'a TextureHandle>,
}

impl<'a> OverlayView<'a> {
    pub fn new(state: &'a mut AssistantState, theme: &'a Theme) -> Self {
        Self {
            state,
            theme,
            video_texture: None,
        }
    }

    /// Attach the latest camera texture, when one exists
    pub fn video_texture(mut self, texture: Option<&'a TextureHandle>) -> Self {
        self.video_texture = texture;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let OverlayView {
            state,
            theme,
            video_texture,
        } = self;

        let rect = ui.max_rect();
        ui.painter().rect_filled(rect, 0.0, theme.bg_primary);

        if state.active {
            if let Some(texture) = video_texture {
                VideoSurface::new(texture).show(ui, rect);
            }
        }

        paint_framing_bands(ui, rect, theme);

        if state.active {
            let hologram_rect =
                Rect::from_center_size(rect.center(), Vec2::splat(HOLOGRAM_EXTENT));
            HologramFigure::new(theme).show(ui, hologram_rect);
        }

        if !state.transcript.is_empty() {
            let panel_width = (rect.width() - 2.0 * theme.spacing_lg).min(TRANSCRIPT_MAX_WIDTH);
            let panel_rect = Rect::from_min_size(
                Pos2::new(
                    rect.center().x - panel_width / 2.0,
                    rect.top() + TRANSCRIPT_TOP_MARGIN,
                ),
                Vec2::new(panel_width, TRANSCRIPT_HEIGHT),
            );
            ui.allocate_new_ui(UiBuilder::new().max_rect(panel_rect), |ui| {
                TranscriptPanel::new(&state.transcript, theme).show(ui);
            });
        }

        let controls_rect = Rect::from_min_max(
            Pos2::new(rect.left(), rect.bottom() - CONTROL_STRIP_HEIGHT),
            rect.max,
        );
        ui.allocate_new_ui(UiBuilder::new().max_rect(controls_rect), |ui| {
            ControlBar::new(&mut *state, theme).show(ui);
        });

        if state.notice.is_some() {
            ui.painter()
                .rect_filled(rect, 0.0, Color32::from_black_alpha(160));
            NoticeDialog::new(&mut *state, theme).show(ui.ctx());
        }
    }
}

/// Translucent accent bands fading in from the top and bottom edges
fn paint_framing_bands(ui: &egui::Ui, rect: Rect, theme: &Theme) {
    let top_band = Rect::from_min_max(
        rect.left_top(),
        Pos2::new(rect.right(), rect.top() + BAND_HEIGHT),
    );
    paint_vertical_fade(ui, top_band, theme.band_accent, Color32::TRANSPARENT);

    let bottom_band = Rect::from_min_max(
        Pos2::new(rect.left(), rect.bottom() - BAND_HEIGHT),
        rect.right_bottom(),
    );
    paint_vertical_fade(ui, bottom_band, Color32::TRANSPARENT, theme.band_accent);
}

fn paint_vertical_fade(ui: &egui::Ui, rect: Rect, top: Color32, bottom: Color32) {
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    ui.painter().add(egui::Shape::mesh(mesh));
}
