//! Error type for update checks.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong between asking for the latest release and
/// starting its installer.
#[derive(Error, Debug)]
pub enum UpdateError {
    /// Connection, TLS, or timeout failure.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status code.
    #[error("server responded with HTTP {0}")]
    Status(u16),
    /// The release payload was not the JSON we expect.
    #[error("malformed release data: {0}")]
    Payload(#[from] serde_json::Error),
    /// The release carries no usable version tag.
    #[error("release has no version tag")]
    MissingTag,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid installer pattern: {0}")]
    Pattern(#[from] regex::Error),
    /// The installer could not be started.
    #[error("could not start installer {}: {source}", path.display())]
    Launch {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<ureq::Error> for UpdateError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _) => Self::Status(code),
            ureq::Error::Transport(transport) => Self::Transport(transport.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, UpdateError>;
