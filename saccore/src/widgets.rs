//! Custom widgets for the calculator window

use crate::theme::{display_font, SacColors};
use egui::{Response, Sense, Stroke, Ui, Widget};

/// A keypad key: fixed size, outlined, highlighted while hovered or pressed.
pub struct KeyButton<'a> {
    label: &'a str,
    size: egui::Vec2,
    accent: bool,
}

impl<'a> KeyButton<'a> {
    pub fn new(label: &'a str, size: egui::Vec2) -> Self {
        Self { label, size, accent: false }
    }

    /// Draw with the accent fill (used for "=").
    pub fn accent(mut self, accent: bool) -> Self {
        self.accent = accent;
        self
    }
}

impl<'a> Widget for KeyButton<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(self.size, Sense::click());

        if ui.is_rect_visible(rect) {
            let visuals = ui.style().interact(&response);
            let pressed = response.is_pointer_button_down_on();
            let (fill, text) = match (self.accent, pressed) {
                (true, _) => (SacColors::ACCENT, SacColors::KEY),
                (false, true) => (SacColors::PANEL, SacColors::TEXT),
                (false, false) if response.hovered() => (SacColors::KEY_HOVER, SacColors::TEXT),
                (false, false) => (SacColors::KEY, SacColors::TEXT),
            };

            let painter = ui.painter();
            painter.rect_filled(rect, visuals.rounding, fill);
            painter.rect_stroke(rect, visuals.rounding, Stroke::new(1.0, SacColors::OUTLINE));
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.label,
                egui::TextStyle::Button.resolve(ui.style()),
                text,
            );
        }

        response
    }
}

/// Full-width navigation entry for the sidebar.
pub struct NavButton<'a> {
    label: &'a str,
    selected: bool,
}

impl<'a> NavButton<'a> {
    pub fn new(label: &'a str) -> Self {
        Self { label, selected: false }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl<'a> Widget for NavButton<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let height = ui.spacing().interact_size.y + 8.0;
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(ui.available_width(), height), Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let fill = if self.selected {
                SacColors::ACCENT
            } else if response.hovered() {
                SacColors::KEY_HOVER
            } else {
                SacColors::KEY
            };
            painter.rect_filled(rect, 3.0, fill);
            painter.rect_stroke(rect, 3.0, Stroke::new(1.0, SacColors::OUTLINE));
            painter.text(
                egui::pos2(rect.min.x + 10.0, rect.center().y),
                egui::Align2::LEFT_CENTER,
                self.label,
                egui::TextStyle::Body.resolve(ui.style()),
                if self.selected { SacColors::KEY } else { SacColors::TEXT },
            );
        }

        response
    }
}

/// Right-aligned expression display, as tall as the toggle button beside it.
pub fn expression_display(ui: &mut Ui, text: &str, height: f32) {
    let font = display_font(ui.ctx());
    egui::Frame::none()
        .fill(SacColors::KEY)
        .stroke(Stroke::new(1.0, SacColors::OUTLINE))
        .inner_margin(egui::Margin::symmetric(8.0, 4.0))
        .show(ui, |ui| {
            ui.set_min_height(height - 8.0);
            ui.set_max_height(height - 8.0);
            ui.set_width(ui.available_width());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add(egui::Label::new(egui::RichText::new(text).font(font)).truncate(true));
            });
        });
}

/// Status bar: panel fill, 1px outline
pub fn status_bar(ui: &mut Ui, text: &str) {
    egui::Frame::none()
        .fill(SacColors::PANEL)
        .stroke(Stroke::new(1.0, SacColors::OUTLINE))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(text).small());
        });
}
