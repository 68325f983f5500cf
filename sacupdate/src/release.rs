//! Release descriptors and installer asset selection.

use regex::Regex;
use serde::Deserialize;

/// Default installer file name, e.g. `SAC-Setup-v1.2.0.exe`.
pub const DEFAULT_INSTALLER_PATTERN: &str = r"SAC-Setup-v(?P<ver>\d+\.\d+\.\d+)\.exe$";

/// Extension every installer asset must carry.
pub const DEFAULT_INSTALLER_EXTENSION: &str = ".exe";

/// The subset of a GitHub "latest release" response we care about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub assets: Option<Vec<Asset>>,
}

/// A downloadable file attached to a release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub browser_download_url: Option<String>,
}

impl Asset {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            browser_download_url: Some(url.into()),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Download URL, if the release lists a non-empty one.
    pub fn download_url(&self) -> Option<&str> {
        self.browser_download_url.as_deref().filter(|url| !url.is_empty())
    }
}

impl Release {
    /// Parse the JSON body of a release API response.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a JSON object of the expected shape.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    /// The release's version tag, if present and non-empty.
    pub fn tag(&self) -> Option<&str> {
        self.tag_name.as_deref().map(str::trim).filter(|tag| !tag.is_empty())
    }

    /// Assets attached to the release (empty when missing or `null`).
    pub fn assets(&self) -> &[Asset] {
        self.assets.as_deref().unwrap_or_default()
    }
}

/// Compile an installer pattern. Matching is case-insensitive.
///
/// # Errors
///
/// Returns an error if `pattern` is not a valid regular expression.
pub fn installer_regex(pattern: &str) -> Result<Regex, regex::Error> {
    regex::RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Pick the installer to download from a release.
///
/// The first asset whose name matches `pattern` from its first character and
/// ends with `extension` wins. Without a pattern match, the first asset with
/// the extension is used. Returns `None` when no asset has the extension.
pub fn find_installer_asset<'a>(
    assets: &'a [Asset],
    pattern: Option<&Regex>,
    extension: &str,
) -> Option<&'a Asset> {
    let extension = extension.to_lowercase();
    let has_extension = |asset: &&Asset| asset.name().to_lowercase().ends_with(&extension);

    if let Some(pattern) = pattern {
        let by_pattern = assets
            .iter()
            .filter(has_extension)
            .find(|asset| pattern.find(asset.name()).is_some_and(|m| m.start() == 0));
        if by_pattern.is_some() {
            return by_pattern;
        }
    }

    assets.iter().find(has_extension)
}
