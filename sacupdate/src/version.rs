//! Dotted version numbers.
//!
//! Versions are compared as tuples of integers, so `1.10` is newer than `1.9`
//! and `1.0` is older than `1.0.1` (a shorter prefix sorts first).

use std::fmt;
use std::str::FromStr;

/// A version such as `1.2.0`, parsed from a release tag or the app's own
/// version string. Leading `v`/`V` and whitespace around the whole string or
/// around a component are ignored.
///
/// Components are `u64`; a component that does not fit fails to parse, which
/// makes [`is_newer`] answer `false` for it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version(Vec<u64>);

/// The string was not a dotted list of integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVersionError(String);

impl fmt::Display for ParseVersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a dotted version: {:?}", self.0)
    }
}

impl std::error::Error for ParseVersionError {}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches(['v', 'V']);
        trimmed
            .split('.')
            .map(|part| part.trim().parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map(Version)
            .map_err(|_| ParseVersionError(s.to_owned()))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u64::to_string).collect();
        f.write_str(&parts.join("."))
    }
}

impl Version {
    pub fn components(&self) -> &[u64] {
        &self.0
    }
}

/// Returns `true` only if both strings parse and `candidate` sorts after
/// `current`. Anything unparsable is never newer.
pub fn is_newer(candidate: &str, current: &str) -> bool {
    match (candidate.parse::<Version>(), current.parse::<Version>()) {
        (Ok(candidate), Ok(current)) => candidate > current,
        _ => false,
    }
}
