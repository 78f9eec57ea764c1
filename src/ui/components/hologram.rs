//! Holographic assistant figure
//!
//! Two concentric blue rings painted at the center of the overlay while
//! the assistant is active: an outer ring whose opacity breathes on a two
//! second cycle, and an inner ring that expands and fades like a radar
//! ping.

use crate::ui::theme::Theme;
use egui::{Pos2, Rect, Sense};

const PULSE_RADIUS: f32 = 96.0;
const PING_RADIUS: f32 = 80.0;
const PULSE_PERIOD: f64 = 2.0;
const PING_PERIOD: f64 = 1.2;

/// Pulsing hologram rings
pub struct HologramFigure<'a> {
    theme: &'a Theme,
}

impl<'a> HologramFigure<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// Paint the figure centered in the given rect
    pub fn show(self, ui: &mut egui::Ui, rect: Rect) -> egui::Response {
        let response = ui.allocate_rect(rect, Sense::hover());

        if ui.is_rect_visible(rect) {
            self.paint(ui, rect.center());
        }

        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Other, true, "Assistant hologram")
        });

        response
    }

    fn paint(&self, ui: &egui::Ui, center: Pos2) {
        let painter = ui.painter();
        let t = ui.ctx().input(|i| i.time);

        // Outer ring: opacity oscillates between half and full
        let pulse = (0.75 + 0.25 * (t * std::f64::consts::TAU / PULSE_PERIOD).cos()) as f32;
        painter.circle_stroke(
            center,
            PULSE_RADIUS,
            egui::Stroke::new(2.0, self.theme.primary.gamma_multiply(0.5 * pulse)),
        );

        // Inner ring: grows outward and fades, then restarts
        let phase = ((t / PING_PERIOD) % 1.0) as f32;
        let radius = PING_RADIUS * (1.0 + phase);
        let alpha = 0.4 * (1.0 - phase);
        painter.circle_stroke(
            center,
            radius,
            egui::Stroke::new(2.0, self.theme.primary_bright.gamma_multiply(alpha)),
        );
    }
}
