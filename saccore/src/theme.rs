//! Calculator theme
//!
//! Light panels, 1px outlines, slightly rounded keys. Font sizes follow the
//! layout: a large display, medium keypad labels, regular body text.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

pub struct SacColors;

impl SacColors {
    pub const BACKGROUND: Color32 = Color32::from_rgb(250, 250, 250);
    pub const PANEL: Color32 = Color32::from_rgb(238, 238, 240);
    pub const KEY: Color32 = Color32::from_rgb(255, 255, 255);
    pub const KEY_HOVER: Color32 = Color32::from_rgb(228, 232, 240);
    pub const OUTLINE: Color32 = Color32::from_rgb(180, 180, 186);
    pub const TEXT: Color32 = Color32::from_rgb(20, 20, 24);
    pub const ACCENT: Color32 = Color32::from_rgb(52, 101, 164);
}

/// Name of the text style used by the expression display.
pub const DISPLAY_STYLE: &str = "display";

pub struct SacTheme {
    pub font_size_body: f32,
    pub font_size_button: f32,
    pub font_size_display: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
    pub rounding: f32,
}

impl Default for SacTheme {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_button: 16.0,
            font_size_display: 20.0,
            font_size_heading: 20.0,
            font_size_small: 11.0,
            window_padding: 8.0,
            item_spacing: 6.0,
            rounding: 3.0,
        }
    }
}

impl SacTheme {
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_button, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
            (
                TextStyle::Name(DISPLAY_STYLE.into()),
                FontId::new(self.font_size_display, FontFamily::Monospace),
            ),
        ]
        .into();

        let mut visuals = Visuals::light();
        visuals.window_fill = SacColors::BACKGROUND;
        visuals.panel_fill = SacColors::BACKGROUND;
        visuals.extreme_bg_color = SacColors::KEY;
        visuals.window_rounding = Rounding::same(self.rounding);
        visuals.menu_rounding = Rounding::same(self.rounding);
        visuals.window_stroke = Stroke::new(1.0, SacColors::OUTLINE);

        let rounding = Rounding::same(self.rounding);
        let key = |ws: &mut egui::style::WidgetVisuals, fill: Color32| {
            ws.bg_fill = fill;
            ws.weak_bg_fill = fill;
            ws.bg_stroke = Stroke::new(1.0, SacColors::OUTLINE);
            ws.fg_stroke = Stroke::new(1.0, SacColors::TEXT);
            ws.rounding = rounding;
        };
        key(&mut visuals.widgets.inactive, SacColors::KEY);
        key(&mut visuals.widgets.hovered, SacColors::KEY_HOVER);
        key(&mut visuals.widgets.active, SacColors::PANEL);
        key(&mut visuals.widgets.open, SacColors::PANEL);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, SacColors::TEXT);

        visuals.selection.bg_fill = SacColors::ACCENT;
        visuals.selection.stroke = Stroke::new(1.0, SacColors::KEY);

        style.visuals = visuals;
        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 8.0);

        ctx.set_style(style);
    }

    /// Frame for the sidebar panel.
    pub fn sidebar_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(SacColors::PANEL)
            .stroke(Stroke::new(1.0, SacColors::OUTLINE))
            .inner_margin(egui::Margin::same(12.0))
    }

    /// Frame for the page area.
    pub fn page_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(SacColors::BACKGROUND)
            .inner_margin(egui::Margin::same(8.0))
    }
}

/// Font used by the expression display.
pub fn display_font(ctx: &egui::Context) -> FontId {
    ctx.style()
        .text_styles
        .get(&TextStyle::Name(DISPLAY_STYLE.into()))
        .cloned()
        .unwrap_or_else(|| FontId::monospace(20.0))
}
