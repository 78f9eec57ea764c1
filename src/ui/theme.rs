//! Theme and styling for the assistant overlay
//!
//! A single dark holographic palette: deep blue-black backgrounds, blue
//! glow accents, red for live capture.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Vec2, Visuals};

/// Application theme configuration
#[derive(Clone, Debug)]
pub struct Theme {
    /// Primary hologram accent
    pub primary: Color32,
    /// Brighter accent used for the ping ring and transcript text
    pub primary_bright: Color32,
    /// Darker accent used for hover states
    pub primary_deep: Color32,

    /// Live capture indicator color
    pub listening: Color32,
    /// Capture button hover color
    pub listening_hover: Color32,

    /// Background colors
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,

    /// Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    /// Translucent fill for overlay panels
    pub panel_fill: Color32,
    /// Border stroke color for overlay panels
    pub panel_stroke: Color32,
    /// Accent of the framing bands at the screen edges
    pub band_accent: Color32,

    /// Border radius for buttons
    pub button_rounding: Rounding,
    /// Border radius for cards/panels
    pub card_rounding: Rounding,

    /// Standard spacing
    pub spacing: f32,
    /// Large spacing
    pub spacing_lg: f32,
    /// Small spacing
    pub spacing_sm: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create the dark holographic theme
    pub fn dark() -> Self {
        Self {
            primary: Color32::from_rgb(59, 130, 246),        // Blue
            primary_bright: Color32::from_rgb(96, 165, 250), // Light blue
            primary_deep: Color32::from_rgb(37, 99, 235),    // Deep blue

            listening: Color32::from_rgb(239, 68, 68),       // Red
            listening_hover: Color32::from_rgb(220, 38, 38), // Darker red

            bg_primary: Color32::from_rgb(3, 7, 18),     // Near black
            bg_secondary: Color32::from_rgb(17, 24, 39), // Dark blue-gray
            bg_tertiary: Color32::from_rgb(31, 41, 55),  // Lighter blue-gray

            text_primary: Color32::from_rgb(249, 250, 251),   // Almost white
            text_secondary: Color32::from_rgb(209, 213, 219), // Light gray
            text_muted: Color32::from_rgb(156, 163, 175),     // Medium gray

            panel_fill: Color32::from_rgba_unmultiplied(0, 0, 0, 102),
            panel_stroke: Color32::from_rgba_unmultiplied(59, 130, 246, 128),
            band_accent: Color32::from_rgba_unmultiplied(59, 130, 246, 51),

            button_rounding: Rounding::same(8.0),
            card_rounding: Rounding::same(12.0),

            spacing: 16.0,
            spacing_lg: 24.0,
            spacing_sm: 8.0,
        }
    }

    /// Apply this theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        // Panel backgrounds
        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_secondary;
        visuals.extreme_bg_color = self.bg_tertiary;

        // Widget colors
        visuals.widgets.noninteractive.bg_fill = self.bg_secondary;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_muted);

        visuals.widgets.inactive.bg_fill = self.bg_tertiary;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_secondary);

        visuals.widgets.hovered.bg_fill = self.primary.gamma_multiply(0.8);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.active.bg_fill = self.primary;
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, self.text_primary);

        // Window styling
        visuals.window_rounding = self.card_rounding;
        visuals.window_stroke = Stroke::new(1.0, self.panel_stroke);

        ctx.set_visuals(visuals);

        // Set default style
        let mut style = (*ctx.style()).clone();
        style.spacing.item_spacing = Vec2::splat(self.spacing_sm);
        style.spacing.window_margin = egui::Margin::same(self.spacing);
        style.spacing.button_padding = Vec2::new(self.spacing, self.spacing_sm);

        // Text styles
        style.text_styles.insert(
            egui::TextStyle::Heading,
            FontId::new(22.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Body,
            FontId::new(14.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Monospace,
            FontId::new(13.0, FontFamily::Monospace),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            FontId::new(14.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Small,
            FontId::new(12.0, FontFamily::Proportional),
        );

        ctx.set_style(style);
    }
}
