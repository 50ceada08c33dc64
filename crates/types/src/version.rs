//! Three-part numeric package versions
//!
//! The version is kept as the exact text it was read from, so `1.02.3` or
//! `2019.07.0` survive unchanged. Components are not range-limited.

use irrpkg_errors::VersionError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static EXACT_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("valid regex"));

/// A validated `X.Y.Z` version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version(String);

impl Version {
    /// Build a version from numeric components
    #[must_use]
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(format!("{major}.{minor}.{patch}"))
    }

    /// Validate `input` as an exact `X.Y.Z` version
    ///
    /// # Errors
    ///
    /// Returns `VersionError::InvalidVersion` unless `input` is three
    /// dot-separated runs of digits with nothing around them.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        if EXACT_VERSION.is_match(input) {
            Ok(Self(input.to_string()))
        } else {
            Err(VersionError::InvalidVersion {
                input: input.to_string(),
            })
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.0
    }
}
