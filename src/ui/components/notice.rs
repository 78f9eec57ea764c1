//! Blocking notice dialog
//!
//! Centered window shown over a dimmed overlay whenever a notice is set,
//! for example when voice capture is requested without speech support.

use crate::ui::state::AssistantState;
use crate::ui::theme::Theme;
use egui::{Align2, RichText, Vec2};

/// Modal-style notice with a single dismiss action
pub struct NoticeDialog<'a> {
    state: &'a mut AssistantState,
    theme: &'a Theme,
}

impl<'a> NoticeDialog<'a> {
    pub fn new(state: &'a mut AssistantState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ctx: &egui::Context) {
        let Some(message) = self.state.notice.clone() else {
            return;
        };

        let frame = egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .stroke(egui::Stroke::new(1.0, self.theme.panel_stroke))
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing);

        egui::Window::new("notice")
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .order(egui::Order::Foreground)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .frame(frame)
            .show(ctx, |ui| {
                ui.set_max_width(320.0);

                let label = ui.label(
                    RichText::new(&message)
                        .size(15.0)
                        .color(self.theme.text_primary),
                );
                label.widget_info(|| {
                    egui::WidgetInfo::labeled(
                        egui::WidgetType::Label,
                        true,
                        format!("Notice: {}", message),
                    )
                });

                ui.add_space(self.theme.spacing_sm);

                ui.vertical_centered(|ui| {
                    let button = ui.add(
                        egui::Button::new(RichText::new("Dismiss").color(egui::Color32::WHITE))
                            .fill(self.theme.primary)
                            .rounding(self.theme.button_rounding),
                    );
                    button.widget_info(|| {
                        egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Dismiss notice")
                    });

                    if button.clicked() {
                        self.state.dismiss_notice();
                    }
                });
            });
    }
}
