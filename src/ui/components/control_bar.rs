//! Activation and listening controls
//!
//! A centered row of circular buttons: power is always present, the
//! capture toggle only while the assistant is active. While a blocking
//! notice is up the controls render but ignore input.

use crate::ui::state::AssistantState;
use crate::ui::theme::Theme;
use egui::{Color32, Key, Pos2, Rect, Sense, Vec2};

const BUTTON_SIZE: f32 = 56.0;

/// Control bar for power and voice capture
pub struct ControlBar<'a> {
    state: &'a mut AssistantState,
    theme: &'a Theme,
}

impl<'a> ControlBar<'a> {
    pub fn new(state: &'a mut AssistantState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        let blocked = self.state.notice.is_some();

        ui.vertical_centered(|ui| {
            ui.horizontal(|ui| {
                self.power_button(ui, blocked);

                if self.state.active {
                    ui.add_space(self.theme.spacing);
                    self.listening_button(ui, blocked);
                }
            });
        });

        self.handle_keyboard_shortcut(ui, blocked);
    }

    fn power_button(&mut self, ui: &mut egui::Ui, blocked: bool) {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(BUTTON_SIZE), Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if response.hovered() && !blocked {
                self.theme.primary_deep
            } else {
                self.theme.primary
            };

            let painter = ui.painter();
            painter.circle_filled(rect.center(), BUTTON_SIZE / 2.0 - 2.0, bg_color);

            self.draw_power_glyph(painter, rect.center());
        }

        response.widget_info(|| {
            egui::WidgetInfo::labeled(
                egui::WidgetType::Button,
                !blocked,
                "Toggle assistant power",
            )
        });

        if !blocked {
            if response.clicked() {
                self.state.toggle_active();
            }

            let hint = if self.state.active {
                "Power off assistant"
            } else {
                "Power on assistant"
            };
            response.on_hover_text(hint);
        }
    }

    fn listening_button(&mut self, ui: &mut egui::Ui, blocked: bool) {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(BUTTON_SIZE), Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.state.listening {
                if response.hovered() && !blocked {
                    self.theme.listening_hover
                } else {
                    self.theme.listening
                }
            } else if response.hovered() && !blocked {
                self.theme.primary_deep
            } else {
                self.theme.primary
            };

            let painter = ui.painter();
            painter.circle_filled(rect.center(), BUTTON_SIZE / 2.0 - 2.0, bg_color);

            if self.state.listening {
                self.draw_stop_glyph(painter, rect.center());
                self.draw_pulsing_rings(ui, rect.center());
            } else {
                self.draw_mic_glyph(painter, rect.center());
            }
        }

        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Button, !blocked, "Toggle voice capture")
        });

        if !blocked {
            if response.clicked() {
                self.state.toggle_listening();
            }

            let hint = if self.state.listening {
                "Stop listening (Space)"
            } else {
                "Start listening (Space)"
            };
            response.on_hover_text(hint);
        }
    }

    /// Classic power symbol: an arc with a vertical bar through the top
    fn draw_power_glyph(&self, painter: &egui::Painter, center: Pos2) {
        let color = Color32::WHITE;
        let radius = 9.0;

        // Arc, leaving a gap at the top for the bar
        let num_segments = 12;
        for i in 0..num_segments {
            let sweep = std::f32::consts::TAU * 0.78;
            let start_angle =
                -std::f32::consts::FRAC_PI_2 + 0.11 * std::f32::consts::TAU
                    + sweep * (i as f32 / num_segments as f32);
            let end_angle = -std::f32::consts::FRAC_PI_2 + 0.11 * std::f32::consts::TAU
                + sweep * ((i + 1) as f32 / num_segments as f32);

            let start = Pos2::new(
                center.x + radius * start_angle.cos(),
                center.y + radius * start_angle.sin(),
            );
            let end = Pos2::new(
                center.x + radius * end_angle.cos(),
                center.y + radius * end_angle.sin(),
            );

            painter.line_segment([start, end], egui::Stroke::new(2.5, color));
        }

        // Vertical bar
        painter.line_segment(
            [
                center + Vec2::new(0.0, -12.0),
                center + Vec2::new(0.0, -2.0),
            ],
            egui::Stroke::new(2.5, color),
        );
    }

    /// Stop square shown while capture is live
    fn draw_stop_glyph(&self, painter: &egui::Painter, center: Pos2) {
        painter.rect_filled(
            Rect::from_center_size(center, Vec2::splat(15.0)),
            2.0,
            Color32::WHITE,
        );
    }

    /// Microphone glyph shown while capture is off
    fn draw_mic_glyph(&self, painter: &egui::Painter, center: Pos2) {
        let color = Color32::WHITE;

        // Mic body
        let mic_rect = Rect::from_center_size(
            Pos2::new(center.x, center.y - 3.0),
            Vec2::new(8.0, 13.0),
        );
        painter.rect_filled(mic_rect, 4.0, color);

        // Mic cradle arc
        let arc_center = Pos2::new(center.x, center.y + 1.0);
        let arc_radius = 9.0;
        let num_segments = 8;
        for i in 0..num_segments {
            let start_angle = std::f32::consts::PI * (i as f32 / num_segments as f32);
            let end_angle = std::f32::consts::PI * ((i + 1) as f32 / num_segments as f32);

            let start = Pos2::new(
                arc_center.x - arc_radius * start_angle.cos(),
                arc_center.y + arc_radius * start_angle.sin(),
            );
            let end = Pos2::new(
                arc_center.x - arc_radius * end_angle.cos(),
                arc_center.y + arc_radius * end_angle.sin(),
            );

            painter.line_segment([start, end], egui::Stroke::new(2.0, color));
        }

        // Stem
        painter.line_segment(
            [
                Pos2::new(center.x, arc_center.y + arc_radius),
                Pos2::new(center.x, arc_center.y + arc_radius + 4.0),
            ],
            egui::Stroke::new(2.0, color),
        );
    }

    /// Expanding rings around the capture button while listening
    fn draw_pulsing_rings(&self, ui: &egui::Ui, center: Pos2) {
        let painter = ui.painter();
        let t = ui.ctx().input(|i| i.time);

        let pulse = ((t * 3.0).sin() * 0.5 + 0.5) as f32;
        let radius = BUTTON_SIZE / 2.0 + pulse * 8.0;
        let alpha = (1.0 - pulse) * 0.6;
        painter.circle_stroke(
            center,
            radius,
            egui::Stroke::new(2.0 + pulse * 2.0, self.theme.listening.gamma_multiply(alpha)),
        );

        let pulse2 = (((t * 3.0) + std::f64::consts::PI).sin() * 0.5 + 0.5) as f32;
        let radius2 = BUTTON_SIZE / 2.0 + pulse2 * 8.0;
        let alpha2 = (1.0 - pulse2) * 0.4;
        painter.circle_stroke(
            center,
            radius2,
            egui::Stroke::new(1.5 + pulse2 * 1.5, self.theme.listening.gamma_multiply(alpha2)),
        );
    }

    /// Space toggles capture while the assistant is active
    fn handle_keyboard_shortcut(&mut self, ui: &egui::Ui, blocked: bool) {
        if blocked || !self.state.active {
            return;
        }

        let space_pressed = ui.input(|i| i.key_pressed(Key::Space));
        let any_widget_focused = ui.memory(|m| m.focused().is_some());

        if space_pressed && !any_widget_focused {
            self.state.toggle_listening();
        }
    }
}
