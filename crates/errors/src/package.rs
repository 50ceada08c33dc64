//! Package reference and dependency resolution error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum PackageError {
    #[error("invalid package reference `{reference}`: {reason}")]
    InvalidReference { reference: String, reason: String },

    #[error("dependency {reference} not found in {cache}")]
    DependencyNotFound { reference: String, cache: String },

    #[error("invalid package info for {reference}: {message}")]
    InvalidPackageInfo { reference: String, message: String },

    #[error("recipe declares no components")]
    NoComponents,
}

impl UserFacingError for PackageError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidReference { .. } => {
                Some("Use `name/X.Y.Z@user/channel`; version ranges are not accepted.")
            }
            Self::DependencyNotFound { .. } => {
                Some("Create the dependency package in the local cache first.")
            }
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::InvalidReference { .. } => "package.invalid_reference",
            Self::DependencyNotFound { .. } => "package.dependency_not_found",
            Self::InvalidPackageInfo { .. } => "package.invalid_package_info",
            Self::NoComponents => "package.no_components",
        };
        Some(code)
    }
}
