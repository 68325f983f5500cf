//! The update check flow.
//!
//! One call to [`UpdateChecker::check`] fetches the latest release, compares
//! it against the running version, picks an installer, asks the user, then
//! downloads and starts it. Every failure ends the check; nothing is retried.

use crate::error::Result;
use crate::launcher::{Launcher, ProcessLauncher};
use crate::prompt::{DialogPrompter, Prompter};
use crate::release::{
    find_installer_asset, installer_regex, DEFAULT_INSTALLER_EXTENSION, DEFAULT_INSTALLER_PATTERN,
};
use crate::source::{GithubSource, ReleaseSource, GITHUB_API};
use crate::version::is_newer;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};

const DIALOG_TITLE: &str = "update";

/// How a single update check ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The running version is the latest (or newer).
    UpToDate,
    /// A newer version exists but the user chose not to install it.
    UpdateDeclined,
    /// The installer is running; the application should exit now.
    UpdateInstalling,
    /// A newer version exists but has no installer attached.
    NoInstallerAsset { tag: String },
    /// Download or launch of the installer failed.
    InstallFailed(String),
    /// The release could not be fetched or understood.
    CheckFailed(String),
}

impl UpdateOutcome {
    /// Whether the application should shut down after this outcome.
    pub fn requires_exit(&self) -> bool {
        matches!(self, Self::UpdateInstalling)
    }
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpToDate => write!(f, "up to date"),
            Self::UpdateDeclined => write!(f, "update declined"),
            Self::UpdateInstalling => write!(f, "installer started"),
            Self::NoInstallerAsset { tag } => write!(f, "version {tag} has no installer"),
            Self::InstallFailed(reason) => write!(f, "install failed: {reason}"),
            Self::CheckFailed(reason) => write!(f, "check failed: {reason}"),
        }
    }
}

/// What to check and where to put the installer.
#[derive(Debug, Clone)]
pub struct UpdaterConfig {
    /// Repository as `owner/name`.
    pub repo: String,
    /// Version of the running application.
    pub current_version: String,
    /// Only speak up when an update is found.
    pub silent: bool,
    /// Preferred installer file name; matched from the start, case-insensitive.
    pub installer_pattern: Option<Regex>,
    /// Extension an installer must have.
    pub installer_extension: String,
    /// Directory the installer is downloaded into.
    pub download_dir: PathBuf,
    /// Base URL of the releases API.
    pub api_base: String,
}

impl UpdaterConfig {
    /// Configuration with the default installer pattern, temp directory and
    /// GitHub API.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in installer pattern fails to compile.
    pub fn new(repo: impl Into<String>, current_version: impl Into<String>) -> Result<Self> {
        Ok(Self {
            repo: repo.into(),
            current_version: current_version.into(),
            silent: false,
            installer_pattern: Some(installer_regex(DEFAULT_INSTALLER_PATTERN)?),
            installer_extension: DEFAULT_INSTALLER_EXTENSION.to_owned(),
            download_dir: std::env::temp_dir(),
            api_base: GITHUB_API.to_owned(),
        })
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Replace the installer pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn with_installer_pattern(mut self, pattern: &str) -> Result<Self> {
        self.installer_pattern = Some(installer_regex(pattern)?);
        Ok(self)
    }

    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }
}

/// Runs update checks against a release source, asking the user through a
/// prompter and starting installers through a launcher.
pub struct UpdateChecker<S = GithubSource, P = DialogPrompter, L = ProcessLauncher> {
    config: UpdaterConfig,
    source: S,
    prompter: P,
    launcher: L,
}

impl UpdateChecker {
    /// Checker wired to GitHub, native dialogs and a real process launch.
    pub fn github(config: UpdaterConfig) -> Self {
        let source = GithubSource::new(config.api_base.clone());
        Self::new(config, source, DialogPrompter, ProcessLauncher)
    }
}

impl<S: ReleaseSource, P: Prompter, L: Launcher> UpdateChecker<S, P, L> {
    pub fn new(config: UpdaterConfig, source: S, prompter: P, launcher: L) -> Self {
        Self {
            config,
            source,
            prompter,
            launcher,
        }
    }

    pub fn config(&self) -> &UpdaterConfig {
        &self.config
    }

    /// Run one complete update check. Blocks for network I/O and dialogs.
    pub fn check(&self) -> UpdateOutcome {
        let current = self.config.current_version.as_str();

        let release = match self.source.latest_release(&self.config.repo) {
            Ok(release) => release,
            Err(e) => {
                tracing::warn!("update check failed: {e}");
                self.notify(&format!("could not check for updates:\n{e}"));
                return UpdateOutcome::CheckFailed(e.to_string());
            }
        };

        let Some(tag) = release.tag() else {
            tracing::warn!("latest release has no tag");
            self.notify("no valid release found.");
            return UpdateOutcome::CheckFailed("release has no version tag".to_owned());
        };

        if !is_newer(tag, current) {
            tracing::info!("up to date (running {current}, latest {tag})");
            self.notify(&format!("you are up to date ({current})."));
            return UpdateOutcome::UpToDate;
        }

        tracing::info!("version {tag} is available (running {current})");
        let asset = find_installer_asset(
            release.assets(),
            self.config.installer_pattern.as_ref(),
            &self.config.installer_extension,
        );
        let target = asset.and_then(|asset| {
            let url = asset.download_url()?;
            let file_name = Path::new(asset.name()).file_name()?;
            Some((url, self.config.download_dir.join(file_name)))
        });
        let Some((url, dest)) = target else {
            tracing::warn!("release {tag} has no installer asset");
            self.prompter.info(
                DIALOG_TITLE,
                &format!("found new version {tag}, but it has no installer."),
            );
            return UpdateOutcome::NoInstallerAsset { tag: tag.to_owned() };
        };

        let question = format!(
            "version {tag} is available (current {current}).\ndownload and install now?"
        );
        if !self.prompter.confirm("update available", &question) {
            tracing::info!("update to {tag} declined");
            return UpdateOutcome::UpdateDeclined;
        }

        if let Err(e) = self.source.download(url, &dest) {
            tracing::warn!("download of {url} failed: {e}");
            let _ = std::fs::remove_file(&dest);
            self.prompter
                .warn("download failed", &format!("could not download the update:\n{e}"));
            return UpdateOutcome::InstallFailed(e.to_string());
        }

        if let Err(e) = self.launcher.launch(&dest) {
            tracing::warn!("{e}");
            self.prompter
                .warn("install failed", &format!("could not start the installer:\n{e}"));
            return UpdateOutcome::InstallFailed(e.to_string());
        }

        self.prompter
            .info(DIALOG_TITLE, "installer started. the app will close now.");
        UpdateOutcome::UpdateInstalling
    }

    /// Informational notice that silent mode suppresses.
    fn notify(&self, message: &str) {
        if !self.config.silent {
            self.prompter.info(DIALOG_TITLE, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpdateError;
    use crate::release::{Asset, Release};
    use std::cell::{Cell, RefCell};

    struct FakeSource {
        release: Option<Release>,
        fetch_error: Option<fn() -> UpdateError>,
        payload: Vec<u8>,
        fail_download: bool,
        downloads: RefCell<Vec<(String, PathBuf)>>,
    }

    impl FakeSource {
        fn with_release(tag: &str, assets: Vec<Asset>) -> Self {
            Self {
                release: Some(Release {
                    tag_name: Some(tag.to_owned()),
                    assets: Some(assets),
                }),
                fetch_error: None,
                payload: b"MZ fake installer".to_vec(),
                fail_download: false,
                downloads: RefCell::new(Vec::new()),
            }
        }

        fn failing(make_error: fn() -> UpdateError) -> Self {
            Self {
                fetch_error: Some(make_error),
                ..Self::unreachable()
            }
        }

        fn unreachable() -> Self {
            Self {
                release: None,
                fetch_error: None,
                payload: Vec::new(),
                fail_download: false,
                downloads: RefCell::new(Vec::new()),
            }
        }
    }

    impl ReleaseSource for FakeSource {
        fn latest_release(&self, _repo: &str) -> Result<Release> {
            if let Some(make_error) = self.fetch_error {
                return Err(make_error());
            }
            self.release
                .clone()
                .ok_or_else(|| UpdateError::Transport("connection refused".to_owned()))
        }

        fn download(&self, url: &str, dest: &Path) -> Result<u64> {
            self.downloads.borrow_mut().push((url.to_owned(), dest.to_owned()));
            if self.fail_download {
                std::fs::write(dest, b"partial")?;
                return Err(UpdateError::Status(404));
            }
            std::fs::write(dest, &self.payload)?;
            Ok(self.payload.len() as u64)
        }
    }

    #[derive(Default)]
    struct FakePrompter {
        answer: bool,
        infos: RefCell<Vec<String>>,
        warnings: RefCell<Vec<String>>,
        questions: RefCell<Vec<String>>,
    }

    impl FakePrompter {
        fn answering(answer: bool) -> Self {
            Self {
                answer,
                ..Self::default()
            }
        }
    }

    impl Prompter for FakePrompter {
        fn info(&self, _title: &str, message: &str) {
            self.infos.borrow_mut().push(message.to_owned());
        }

        fn warn(&self, _title: &str, message: &str) {
            self.warnings.borrow_mut().push(message.to_owned());
        }

        fn confirm(&self, _title: &str, message: &str) -> bool {
            self.questions.borrow_mut().push(message.to_owned());
            self.answer
        }
    }

    #[derive(Default)]
    struct FakeLauncher {
        fail: bool,
        launched: RefCell<Vec<PathBuf>>,
        calls: Cell<usize>,
    }

    impl Launcher for FakeLauncher {
        fn launch(&self, installer: &Path) -> Result<()> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(UpdateError::Launch {
                    path: installer.to_owned(),
                    source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
                });
            }
            self.launched.borrow_mut().push(installer.to_owned());
            Ok(())
        }
    }

    fn installer_assets() -> Vec<Asset> {
        vec![
            Asset::new("SAC-Setup-v1.2.0.exe", "https://example.test/SAC-Setup-v1.2.0.exe"),
            Asset::new("readme.txt", "https://example.test/readme.txt"),
        ]
    }

    fn config(current: &str, dir: &Path) -> UpdaterConfig {
        UpdaterConfig::new("Petaki224/Super-Awesome-Calculator", current)
            .unwrap()
            .with_download_dir(dir)
    }

    #[test]
    fn test_declining_downloads_and_launches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::with_release("1.2.0", installer_assets());
        let prompter = FakePrompter::answering(false);
        let launcher = FakeLauncher::default();

        let checker = UpdateChecker::new(config("1.1", dir.path()), &source, &prompter, &launcher);
        assert_eq!(checker.check(), UpdateOutcome::UpdateDeclined);

        assert_eq!(prompter.questions.borrow().len(), 1);
        assert!(prompter.questions.borrow()[0].contains("1.2.0"));
        assert!(source.downloads.borrow().is_empty());
        assert_eq!(launcher.calls.get(), 0);
        assert!(!dir.path().join("SAC-Setup-v1.2.0.exe").exists());
    }

    #[test]
    fn test_accepting_downloads_then_launches() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::with_release("v1.2.0", installer_assets());
        let prompter = FakePrompter::answering(true);
        let launcher = FakeLauncher::default();

        let checker = UpdateChecker::new(config("1.1", dir.path()), &source, &prompter, &launcher);
        let outcome = checker.check();
        assert_eq!(outcome, UpdateOutcome::UpdateInstalling);
        assert!(outcome.requires_exit());

        let expected = dir.path().join("SAC-Setup-v1.2.0.exe");
        assert_eq!(
            source.downloads.borrow().as_slice(),
            &[("https://example.test/SAC-Setup-v1.2.0.exe".to_owned(), expected.clone())]
        );
        assert_eq!(std::fs::read(&expected).unwrap(), b"MZ fake installer");
        assert_eq!(launcher.launched.borrow().as_slice(), &[expected]);
        assert_eq!(prompter.infos.borrow().len(), 1);
        assert!(prompter.infos.borrow()[0].contains("installer started"));
    }

    #[test]
    fn test_same_version_is_up_to_date() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::with_release("1.1.0", installer_assets());
        let prompter = FakePrompter::answering(true);
        let launcher = FakeLauncher::default();

        let checker = UpdateChecker::new(config("1.1.0", dir.path()), &source, &prompter, &launcher);
        assert_eq!(checker.check(), UpdateOutcome::UpToDate);
        assert_eq!(prompter.infos.borrow().len(), 1);
        assert!(prompter.questions.borrow().is_empty());
    }

    #[test]
    fn test_silent_mode_hides_up_to_date_notice() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::with_release("1.0.0", installer_assets());
        let prompter = FakePrompter::answering(true);
        let launcher = FakeLauncher::default();

        let checker = UpdateChecker::new(
            config("1.1", dir.path()).silent(true),
            &source,
            &prompter,
            &launcher,
        );
        assert_eq!(checker.check(), UpdateOutcome::UpToDate);
        assert!(prompter.infos.borrow().is_empty());
    }

    #[test]
    fn test_unreachable_source_fails_the_check() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::unreachable();
        let prompter = FakePrompter::answering(true);
        let launcher = FakeLauncher::default();

        let checker = UpdateChecker::new(config("1.1", dir.path()), &source, &prompter, &launcher);
        match checker.check() {
            UpdateOutcome::CheckFailed(reason) => assert!(reason.contains("connection refused")),
            other => panic!("expected CheckFailed, got {other:?}"),
        }
        assert_eq!(prompter.infos.borrow().len(), 1);
        assert!(prompter.warnings.borrow().is_empty());
    }

    #[test]
    fn test_silent_mode_hides_fetch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::unreachable();
        let prompter = FakePrompter::answering(true);
        let launcher = FakeLauncher::default();

        let checker = UpdateChecker::new(
            config("1.1", dir.path()).silent(true),
            &source,
            &prompter,
            &launcher,
        );
        assert!(matches!(checker.check(), UpdateOutcome::CheckFailed(_)));
        assert!(prompter.infos.borrow().is_empty());
    }

    #[test]
    fn test_missing_tag_fails_the_check() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = FakeSource::with_release("", installer_assets());
        source.release = Some(Release {
            tag_name: None,
            assets: Some(installer_assets()),
        });
        let prompter = FakePrompter::answering(true);
        let launcher = FakeLauncher::default();

        let checker = UpdateChecker::new(config("1.1", dir.path()), &source, &prompter, &launcher);
        assert!(matches!(checker.check(), UpdateOutcome::CheckFailed(_)));
        assert!(prompter.questions.borrow().is_empty());
    }

    #[test]
    fn test_newer_release_without_installer() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::with_release(
            "2.0.0",
            vec![Asset::new("source.zip", "https://example.test/source.zip")],
        );
        // silent mode still reports a found update
        let prompter = FakePrompter::answering(true);
        let launcher = FakeLauncher::default();

        let checker = UpdateChecker::new(
            config("1.1", dir.path()).silent(true),
            &source,
            &prompter,
            &launcher,
        );
        assert_eq!(
            checker.check(),
            UpdateOutcome::NoInstallerAsset { tag: "2.0.0".to_owned() }
        );
        assert_eq!(prompter.infos.borrow().len(), 1);
        assert!(prompter.questions.borrow().is_empty());
    }

    #[test]
    fn test_installer_without_url_counts_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::with_release(
            "2.0.0",
            vec![Asset {
                name: Some("SAC-Setup-v2.0.0.exe".to_owned()),
                browser_download_url: None,
            }],
        );
        let prompter = FakePrompter::answering(true);
        let launcher = FakeLauncher::default();

        let checker = UpdateChecker::new(config("1.1", dir.path()), &source, &prompter, &launcher);
        assert!(matches!(checker.check(), UpdateOutcome::NoInstallerAsset { .. }));
    }

    #[test]
    fn test_failed_download_warns_and_skips_launch() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = FakeSource::with_release("1.2.0", installer_assets());
        source.fail_download = true;
        let prompter = FakePrompter::answering(true);
        let launcher = FakeLauncher::default();

        let checker = UpdateChecker::new(config("1.1", dir.path()), &source, &prompter, &launcher);
        assert!(matches!(checker.check(), UpdateOutcome::InstallFailed(_)));
        assert_eq!(prompter.warnings.borrow().len(), 1);
        assert_eq!(launcher.calls.get(), 0);
        assert!(!dir.path().join("SAC-Setup-v1.2.0.exe").exists());
    }

    #[test]
    fn test_failed_launch_warns_and_keeps_running() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::with_release("1.2.0", installer_assets());
        let prompter = FakePrompter::answering(true);
        let launcher = FakeLauncher {
            fail: true,
            ..FakeLauncher::default()
        };

        let checker = UpdateChecker::new(config("1.1", dir.path()), &source, &prompter, &launcher);
        let outcome = checker.check();
        assert!(matches!(outcome, UpdateOutcome::InstallFailed(_)));
        assert!(!outcome.requires_exit());
        assert_eq!(prompter.warnings.borrow().len(), 1);
        assert!(prompter.infos.borrow().is_empty());
    }

    #[test]
    fn test_asset_name_cannot_escape_download_dir() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::with_release(
            "1.2.0",
            vec![Asset::new("../../SAC-Setup-v1.2.0.exe", "https://example.test/x.exe")],
        );
        let prompter = FakePrompter::answering(true);
        let launcher = FakeLauncher::default();

        let checker = UpdateChecker::new(config("1.1", dir.path()), &source, &prompter, &launcher);
        assert_eq!(checker.check(), UpdateOutcome::UpdateInstalling);
        assert_eq!(
            source.downloads.borrow()[0].1,
            dir.path().join("SAC-Setup-v1.2.0.exe")
        );
    }

    #[test]
    fn test_server_error_fails_the_check() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::failing(|| UpdateError::Status(500));
        let prompter = FakePrompter::answering(true);
        let launcher = FakeLauncher::default();

        let checker = UpdateChecker::new(config("1.1", dir.path()), &source, &prompter, &launcher);
        match checker.check() {
            UpdateOutcome::CheckFailed(reason) => assert!(reason.contains("500")),
            other => panic!("expected CheckFailed, got {other:?}"),
        }
        assert_eq!(prompter.infos.borrow().len(), 1);
        assert!(prompter.questions.borrow().is_empty());
        assert!(source.downloads.borrow().is_empty());
    }

    #[test]
    fn test_malformed_payload_fails_the_check() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::failing(|| match Release::from_json("<html>rate limited</html>") {
            Err(e) => UpdateError::from(e),
            Ok(_) => UpdateError::MissingTag,
        });
        let prompter = FakePrompter::answering(true);
        let launcher = FakeLauncher::default();

        let checker = UpdateChecker::new(config("1.1", dir.path()), &source, &prompter, &launcher);
        match checker.check() {
            UpdateOutcome::CheckFailed(reason) => {
                assert!(reason.starts_with("malformed release data"), "{reason}")
            }
            other => panic!("expected CheckFailed, got {other:?}"),
        }
        assert_eq!(launcher.calls.get(), 0);
    }

    #[test]
    fn test_custom_installer_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::with_release(
            "1.2.0",
            vec![
                Asset::new("SAC-Setup-v1.2.0.exe", "https://example.test/setup.exe"),
                Asset::new("sac-portable-1.2.0.exe", "https://example.test/portable.exe"),
            ],
        );
        let prompter = FakePrompter::answering(true);
        let launcher = FakeLauncher::default();

        let config = config("1.1", dir.path())
            .with_installer_pattern(r"SAC-Portable-\d")
            .unwrap();
        let checker = UpdateChecker::new(config, &source, &prompter, &launcher);
        assert_eq!(
            checker.config().installer_pattern.as_ref().map(Regex::as_str),
            Some(r"SAC-Portable-\d")
        );

        assert_eq!(checker.check(), UpdateOutcome::UpdateInstalling);
        assert_eq!(
            source.downloads.borrow().as_slice(),
            &[(
                "https://example.test/portable.exe".to_owned(),
                dir.path().join("sac-portable-1.2.0.exe")
            )]
        );
    }

    #[test]
    fn test_invalid_installer_pattern_is_rejected() {
        let result = UpdaterConfig::new("Petaki224/Super-Awesome-Calculator", "1.1")
            .unwrap()
            .with_installer_pattern("SAC-Setup-(");
        assert!(matches!(result, Err(UpdateError::Pattern(_))));
    }
}
