//! Self-update for the Super Awesome Calculator.
//!
//! Checks the latest GitHub release of a repository, compares its tag with the
//! running version, and if the user agrees downloads the Windows installer to
//! the temp directory and starts it. The caller gets an [`UpdateOutcome`] back
//! and decides whether to exit.

pub mod checker;
pub mod error;
pub mod launcher;
pub mod prompt;
pub mod release;
pub mod source;
pub mod version;

pub use checker::{UpdateChecker, UpdateOutcome, UpdaterConfig};
pub use error::{Result, UpdateError};
pub use launcher::{Launcher, ProcessLauncher};
pub use prompt::{DialogPrompter, Prompter};
pub use release::{find_installer_asset, Asset, Release};
pub use source::{GithubSource, ReleaseSource};
pub use version::{is_newer, Version};
