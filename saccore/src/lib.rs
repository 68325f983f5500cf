//! saccore: shared UI plumbing for the Super Awesome Calculator

pub mod animation;
pub mod repaint;
pub mod theme;
pub mod widgets;

pub use animation::Sidebar;
pub use repaint::RepaintController;
pub use theme::SacTheme;
