//! Super Awesome Calculator
//!
//! Expression calculator with a slide-out page menu, a session history and a
//! GitHub release updater.

mod app;
mod config;
mod expr;
mod history;
mod keypad;
mod shell;

use app::CalculatorApp;
use config::AppConfig;
use eframe::NativeOptions;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::default();
    let title = config.window_title();
    tracing::info!("starting {title}");

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title(title),
        ..Default::default()
    };

    eframe::run_native(
        config.app_name,
        options,
        Box::new(move |cc| {
            saccore::SacTheme::default().apply(&cc.egui_ctx);
            Box::new(CalculatorApp::new(cc, config))
        }),
    )
}
