//! Where releases come from.
//!
//! [`GithubSource`] talks to the GitHub releases API with blocking `ureq`
//! calls. The [`ReleaseSource`] trait lets the checker run against a fake in
//! tests.

use crate::error::Result;
use crate::release::Release;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

/// Public GitHub API host.
pub const GITHUB_API: &str = "https://api.github.com";

const USER_AGENT: &str = "SAC-Updater";

/// Timeout for the release metadata request.
const API_TIMEOUT: Duration = Duration::from_secs(12);

/// Timeout for each read while downloading an installer.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Installers are streamed to disk in chunks of this size.
pub const DOWNLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Fetches release metadata and downloads release assets.
pub trait ReleaseSource {
    /// Fetch the latest published release of `repo` (`owner/name`).
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// malformed payload.
    fn latest_release(&self, repo: &str) -> Result<Release>;

    /// Download `url` into the file at `dest`, returning the number of bytes
    /// written.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the file cannot be written.
    fn download(&self, url: &str, dest: &Path) -> Result<u64>;
}

impl<T: ReleaseSource + ?Sized> ReleaseSource for &T {
    fn latest_release(&self, repo: &str) -> Result<Release> {
        (**self).latest_release(repo)
    }

    fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        (**self).download(url, dest)
    }
}

/// Release source backed by the GitHub REST API.
pub struct GithubSource {
    api_base: String,
    api: ureq::Agent,
    downloads: ureq::Agent,
}

impl Default for GithubSource {
    fn default() -> Self {
        Self::new(GITHUB_API)
    }
}

impl GithubSource {
    pub fn new(api_base: impl Into<String>) -> Self {
        let api = ureq::AgentBuilder::new()
            .timeout_connect(API_TIMEOUT)
            .timeout(API_TIMEOUT)
            .user_agent(USER_AGENT)
            .build();
        let downloads = ureq::AgentBuilder::new()
            .timeout_connect(DOWNLOAD_TIMEOUT)
            .timeout_read(DOWNLOAD_TIMEOUT)
            .user_agent(USER_AGENT)
            .build();
        Self {
            api_base: api_base.into().trim_end_matches('/').to_owned(),
            api,
            downloads,
        }
    }

    pub fn latest_release_url(&self, repo: &str) -> String {
        format!("{}/repos/{}/releases/latest", self.api_base, repo.trim_matches('/'))
    }
}

impl ReleaseSource for GithubSource {
    fn latest_release(&self, repo: &str) -> Result<Release> {
        let url = self.latest_release_url(repo);
        tracing::info!("checking for updates at {url}");

        let body = self
            .api
            .get(&url)
            .set("Accept", "application/vnd.github+json")
            .call()?
            .into_string()?;

        let release = Release::from_json(&body)?;
        tracing::debug!(tag = ?release.tag(), assets = release.assets().len(), "latest release fetched");
        Ok(release)
    }

    fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        tracing::info!("downloading {url} to {}", dest.display());

        let response = self.downloads.get(url).call()?;
        let mut reader = response.into_reader();
        let mut file = File::create(dest)?;
        let written = copy_in_chunks(&mut reader, &mut file)?;
        file.flush()?;

        tracing::info!("downloaded {written} bytes");
        Ok(written)
    }
}

/// Copy `reader` into `writer` one fixed-size chunk at a time.
fn copy_in_chunks(reader: &mut impl Read, writer: &mut impl Write) -> std::io::Result<u64> {
    let mut buf = vec![0u8; DOWNLOAD_CHUNK_SIZE];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buf[..n])?;
        total += n as u64;
    }
}
