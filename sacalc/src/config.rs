//! Build-time application settings

use saccore::animation::{SIDEBAR_WIDTH, SLIDE_DURATION};
use sacupdate::UpdaterConfig;

pub const APP_NAME: &str = "Super Awesome Calculator";

/// Repository whose releases feed the updater.
pub const RELEASE_REPO: &str = "Petaki224/Super-Awesome-Calculator";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_name: &'static str,
    pub version: &'static str,
    pub repo: String,
    pub sidebar_width: f32,
    pub slide_duration: f32,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: APP_NAME,
            version: env!("CARGO_PKG_VERSION"),
            repo: RELEASE_REPO.to_string(),
            sidebar_width: SIDEBAR_WIDTH,
            slide_duration: SLIDE_DURATION,
            window_size: [460.0, 420.0],
            min_window_size: [320.0, 360.0],
        }
    }
}

impl AppConfig {
    pub fn window_title(&self) -> String {
        format!("{} v{}", self.app_name, self.version)
    }

    /// Updater settings for an interactive check.
    pub fn updater_config(&self) -> sacupdate::Result<UpdaterConfig> {
        UpdaterConfig::new(self.repo.as_str(), self.version)
    }
}
