//! Super Awesome Calculator window

use crate::config::AppConfig;
use crate::keypad::{self, KEYPAD};
use crate::shell::{Action, Page, Shell};
use egui::{Context, RichText};
use saccore::widgets::{expression_display, status_bar, KeyButton, NavButton};
use saccore::{RepaintController, SacTheme, Sidebar};
use sacupdate::{UpdateChecker, UpdateOutcome, UpdaterConfig};

/// Height of the top bar (toggle button and display).
const TOP_BAR_HEIGHT: f32 = 40.0;

/// Largest frame delta fed to the sidebar animation, so a frame after a long
/// idle period does not skip the slide.
const MAX_FRAME_DT: f32 = 1.0 / 30.0;

pub struct CalculatorApp {
    config: AppConfig,
    updater: Option<UpdaterConfig>,
    shell: Shell,
    last_update: Option<UpdateOutcome>,
    repaint: RepaintController,
}

impl CalculatorApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let updater = match config.updater_config() {
            Ok(updater) => Some(updater),
            Err(e) => {
                tracing::warn!("update checks disabled: {e}");
                None
            }
        };
        let sidebar = Sidebar::new(config.sidebar_width, config.slide_duration);

        Self {
            config,
            updater,
            shell: Shell::new(sidebar),
            last_update: None,
            repaint: RepaintController::new(),
        }
    }

    fn handle_keys(&mut self, ctx: &Context) {
        if self.shell.page() != Page::Calculator {
            return;
        }
        let actions = ctx.input(|i| keypad::actions_from_events(&i.events));
        for action in actions {
            self.shell.dispatch(action);
        }
    }

    fn check_for_updates(&mut self, ctx: &Context) {
        let outcome = match &self.updater {
            Some(config) => UpdateChecker::github(config.clone()).check(),
            None => UpdateOutcome::CheckFailed("updater is not configured".into()),
        };
        tracing::info!("update check finished: {outcome}");
        self.shell.set_status(format!("update: {outcome}"));

        if outcome.requires_exit() {
            tracing::info!("installer running, closing window");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        self.last_update = Some(outcome);
        self.repaint.mark_needs_repaint();
    }

    fn render_sidebar(&self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        // Lay out at full width and let the panel clip while it slides.
        ui.set_clip_rect(ui.max_rect().intersect(ui.clip_rect()));
        let content_width = (self.config.sidebar_width - 24.0).max(0.0);

        ui.allocate_ui(egui::vec2(content_width, ui.available_height()), |ui| {
            ui.label(RichText::new("menu").small());
            ui.add_space(4.0);
            for page in Page::ALL {
                let selected = self.shell.page() == page;
                if ui.add(NavButton::new(page.label()).selected(selected)).clicked() {
                    actions.push(Action::SwitchPage(page));
                }
            }
        });
    }

    /// Toggle button shared by every page header.
    fn toggle_button(ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        let button = egui::Button::new("☰");
        if ui
            .add_sized([TOP_BAR_HEIGHT, TOP_BAR_HEIGHT], button)
            .on_hover_text("show or hide the menu")
            .clicked()
        {
            actions.push(Action::ToggleSidebar);
        }
    }

    fn render_calculator(&self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        ui.horizontal(|ui| {
            Self::toggle_button(ui, actions);
            expression_display(ui, self.shell.buffer().text(), TOP_BAR_HEIGHT);
        });
        ui.add_space(8.0);

        let gap = ui.spacing().item_spacing;
        let rows = KEYPAD.len() as f32;
        let key_w = ((ui.available_width() - 3.0 * gap.x) / 4.0).max(24.0);
        let key_h = ((ui.available_height() - (rows - 1.0) * gap.y) / rows).clamp(28.0, 64.0);

        for row in KEYPAD {
            ui.horizontal(|ui| {
                for label in row {
                    let key = KeyButton::new(label, egui::vec2(key_w, key_h)).accent(label == "=");
                    if ui.add(key).clicked() {
                        actions.extend(keypad::button_action(label));
                    }
                }
            });
        }
    }

    fn render_history(&self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        ui.horizontal(|ui| {
            Self::toggle_button(ui, actions);
            ui.heading("history");
        });
        ui.separator();

        let history = self.shell.history();
        if history.is_empty() {
            ui.label("no calculations yet.");
            return;
        }

        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("{} this session", history.len())).small());
            if ui.button("clear history").clicked() {
                actions.push(Action::ClearHistory);
            }
        });
        ui.add_space(4.0);

        egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            for entry in history.entries() {
                ui.label(
                    RichText::new(format!("{} = {}", entry.expression, entry.result)).monospace(),
                );
            }
        });
    }

    /// Returns true when the user asked for an update check.
    fn render_settings(&self, ui: &mut egui::Ui, actions: &mut Vec<Action>) -> bool {
        ui.horizontal(|ui| {
            Self::toggle_button(ui, actions);
            ui.heading("settings");
        });
        ui.separator();

        ui.label(RichText::new(self.config.app_name).strong());
        ui.label(format!("version {}", self.config.version));
        ui.label(format!("updates from github.com/{}", self.config.repo));
        ui.add_space(8.0);

        let check = ui
            .add_enabled(self.updater.is_some(), egui::Button::new("check for updates"))
            .clicked();

        if let Some(outcome) = &self.last_update {
            ui.add_space(4.0);
            ui.label(format!("last check: {outcome}"));
        }
        check
    }
}

impl eframe::App for CalculatorApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.repaint.begin_frame(ctx);
        tracing::trace!(frame = self.repaint.frame(), reason = ?self.repaint.reason(), "repaint");

        let dt = ctx.input(|i| i.unstable_dt).min(MAX_FRAME_DT);
        self.shell.tick(dt);
        self.handle_keys(ctx);

        let mut actions = Vec::new();
        let mut check_requested = false;

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            status_bar(ui, self.shell.status());
        });

        let width = self.shell.sidebar().width();
        if width >= 1.0 {
            egui::SidePanel::left("sidebar")
                .resizable(false)
                .exact_width(width)
                .frame(SacTheme::sidebar_frame())
                .show(ctx, |ui| self.render_sidebar(ui, &mut actions));
        }

        egui::CentralPanel::default()
            .frame(SacTheme::page_frame())
            .show(ctx, |ui| match self.shell.page() {
                Page::Calculator => self.render_calculator(ui, &mut actions),
                Page::History => self.render_history(ui, &mut actions),
                Page::Settings => check_requested = self.render_settings(ui, &mut actions),
            });

        for action in actions {
            self.shell.dispatch(action);
        }
        if check_requested {
            self.check_for_updates(ctx);
        }

        self.repaint.set_animating(self.shell.sidebar().is_animating());
        self.repaint.end_frame(ctx);
    }
}
