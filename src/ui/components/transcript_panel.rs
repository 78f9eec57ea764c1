//! Transcript display panel
//!
//! Translucent rounded panel showing the live transcript text. Callers
//! render it only while the transcript is non-empty.

use crate::ui::theme::Theme;
use egui::RichText;

/// Panel showing the latest recognized text
pub struct TranscriptPanel<'a> {
    transcript: &'a str,
    theme: &'a Theme,
}

impl<'a> TranscriptPanel<'a> {
    pub fn new(transcript: &'a str, theme: &'a Theme) -> Self {
        Self { transcript, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let frame = egui::Frame::none()
            .fill(self.theme.panel_fill)
            .stroke(egui::Stroke::new(1.0, self.theme.panel_stroke))
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing_sm * 1.5);

        let inner = frame.show(ui, |ui| {
            ui.set_width(ui.available_width());

            let response = ui.label(
                RichText::new(self.transcript)
                    .monospace()
                    .color(self.theme.primary_bright),
            );
            response.widget_info(|| {
                egui::WidgetInfo::labeled(
                    egui::WidgetType::Label,
                    true,
                    format!("Transcript: {}", self.transcript),
                )
            });
        });

        inner.response
    }
}
