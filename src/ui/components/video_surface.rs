//! Camera feed surface
//!
//! Paints the latest webcam texture across the overlay, cropped to cover
//! the rect, with a dark tint so the hologram and text stay readable.

use egui::{Color32, Rect, Sense, TextureHandle, Vec2};

/// Fullscreen camera feed behind the hologram
pub struct VideoSurface<'a> {
    texture: &'a TextureHandle,
}

impl<'a> VideoSurface<'a> {
    pub fn new(texture: &'a TextureHandle) -> Self {
        Self { texture }
    }

    /// Paint the feed into the given rect
    pub fn show(self, ui: &mut egui::Ui, rect: Rect) -> egui::Response {
        let response = ui.allocate_rect(rect, Sense::hover());

        if ui.is_rect_visible(rect) {
            self.paint(ui, rect);
        }

        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Other, true, "Camera feed")
        });

        response
    }

    fn paint(&self, ui: &egui::Ui, rect: Rect) {
        let painter = ui.painter();

        let tex_size = self.texture.size_vec2();
        let uv = cover_uv(tex_size, rect.size());
        painter.image(self.texture.id(), rect, uv, Color32::WHITE);

        // Darken so the overlays on top stay legible
        painter.rect_filled(rect, 0.0, Color32::from_black_alpha(77));
    }
}

/// UV rect that crops the texture to fill the target without stretching
fn cover_uv(tex_size: Vec2, target_size: Vec2) -> Rect {
    if tex_size.x <= 0.0 || tex_size.y <= 0.0 || target_size.x <= 0.0 || target_size.y <= 0.0 {
        return Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    }

    let tex_aspect = tex_size.x / tex_size.y;
    let target_aspect = target_size.x / target_size.y;

    if tex_aspect > target_aspect {
        // Texture is wider than the target: crop the sides
        let frac = target_aspect / tex_aspect;
        Rect::from_min_max(
            egui::pos2(0.5 - frac / 2.0, 0.0),
            egui::pos2(0.5 + frac / 2.0, 1.0),
        )
    } else {
        // Texture is taller than the target: crop top and bottom
        let frac = tex_aspect / target_aspect;
        Rect::from_min_max(
            egui::pos2(0.0, 0.5 - frac / 2.0),
            egui::pos2(1.0, 0.5 + frac / 2.0),
        )
    }
}
