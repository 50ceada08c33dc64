//! Package references and requirements
//!
//! A reference has the shape `name/version[@user/channel]`. Only exact
//! `X.Y.Z` versions are accepted; ranges are rejected at parse time.

use crate::Version;
use irrpkg_errors::PackageError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Exact coordinate of a package
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageRef {
    pub name: String,
    pub version: Version,
    pub user: Option<String>,
    pub channel: Option<String>,
}

impl PackageRef {
    /// Whether the reference comes from a `testing` channel
    #[must_use]
    pub fn is_testing_channel(&self) -> bool {
        self.channel.as_deref() == Some("testing")
    }

    /// `user`, or `_` when absent
    #[must_use]
    pub fn user_or_placeholder(&self) -> &str {
        self.user.as_deref().unwrap_or("_")
    }

    /// `channel`, or `_` when absent
    #[must_use]
    pub fn channel_or_placeholder(&self) -> &str {
        self.channel.as_deref().unwrap_or("_")
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)?;
        if self.user.is_some() || self.channel.is_some() {
            write!(
                f,
                "@{}/{}",
                self.user_or_placeholder(),
                self.channel_or_placeholder()
            )?;
        }
        Ok(())
    }
}

impl FromStr for PackageRef {
    type Err = PackageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| PackageError::InvalidReference {
            reference: s.to_string(),
            reason: reason.to_string(),
        };

        let (coordinate, origin) = match s.split_once('@') {
            Some((coordinate, origin)) => (coordinate, Some(origin)),
            None => (s, None),
        };

        let (name, version) = coordinate
            .split_once('/')
            .ok_or_else(|| invalid("expected name/version"))?;

        if !is_valid_segment(name) {
            return Err(invalid("invalid package name"));
        }
        let version =
            Version::parse(version).map_err(|_| invalid("version must be an exact X.Y.Z pin"))?;

        let (user, channel) = match origin {
            None => (None, None),
            Some(origin) => {
                let (user, channel) = origin
                    .split_once('/')
                    .ok_or_else(|| invalid("expected @user/channel"))?;
                if !is_valid_segment(user) || !is_valid_segment(channel) {
                    return Err(invalid("invalid user or channel"));
                }
                (placeholder_to_none(user), placeholder_to_none(channel))
            }
        };

        Ok(Self {
            name: name.to_string(),
            version,
            user,
            channel,
        })
    }
}

impl Serialize for PackageRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PackageRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn placeholder_to_none(segment: &str) -> Option<String> {
    (segment != "_").then(|| segment.to_string())
}

fn is_valid_segment(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+'))
}

/// A dependency edge declared by a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub reference: PackageRef,
    /// Consumers of this package also see the dependency's headers
    #[serde(default = "default_true")]
    pub transitive_headers: bool,
    /// Consumers of this package also link the dependency's libraries
    #[serde(default = "default_true")]
    pub transitive_libs: bool,
}

impl Requirement {
    /// Requirement whose headers and libraries propagate to consumers
    #[must_use]
    pub fn transitive(reference: PackageRef) -> Self {
        Self {
            reference,
            transitive_headers: true,
            transitive_libs: true,
        }
    }
}

fn default_true() -> bool {
    true
}
