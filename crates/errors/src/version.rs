//! Version extraction error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum VersionError {
    #[error("no `project(... VERSION X.Y.Z)` declaration found in {path}")]
    MissingProjectVersion { path: String },

    #[error("malformed project version `{found}` in {path}")]
    MalformedProjectVersion { path: String, found: String },

    #[error("invalid version `{input}`, expected X.Y.Z")]
    InvalidVersion { input: String },
}

impl UserFacingError for VersionError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingProjectVersion { .. } | Self::MalformedProjectVersion { .. } => Some(
                "Declare the version as `project(<name> VERSION X.Y.Z)` in CMakeLists.txt.",
            ),
            Self::InvalidVersion { .. } => Some("Use a three-part numeric version like 1.2.3."),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::MissingProjectVersion { .. } => "version.missing_project_version",
            Self::MalformedProjectVersion { .. } => "version.malformed_project_version",
            Self::InvalidVersion { .. } => "version.invalid_version",
        };
        Some(code)
    }
}
