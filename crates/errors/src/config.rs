//! Configuration error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: String },

    #[error("parse error: {message}")]
    ParseError { message: String },

    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("cannot read version file {path}: {message}")]
    VersionFileUnreadable { path: String, message: String },

    #[error("unknown option `{option}` for {os}")]
    UnknownOption { option: String, os: String },

    #[error("invalid value for option `{option}`: {value}")]
    InvalidOptionValue { option: String, value: String },

    #[error("unknown setting `{setting}`")]
    UnknownSetting { setting: String },

    #[error("failed to write config to {path}: {error}")]
    WriteError { path: String, error: String },
}

impl UserFacingError for ConfigError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { .. } => Some("Create ~/.config/irrpkg/config.toml or pass --config."),
            Self::ParseError { .. } | Self::InvalidValue { .. } => {
                Some("Fix the configuration value and retry the command.")
            }
            Self::VersionFileUnreadable { .. } => {
                Some("The recipe folder must contain a readable CMakeLists.txt.")
            }
            Self::UnknownOption { .. } | Self::InvalidOptionValue { .. } => {
                Some("Available options are `shared` and `fPIC` (not on Windows), both True/False.")
            }
            Self::UnknownSetting { .. } => {
                Some("Known settings are os, arch, build_type, compiler and compiler.version.")
            }
            Self::WriteError { .. } => Some("Ensure the config path is writable and retry."),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::NotFound { .. } => "config.not_found",
            Self::ParseError { .. } => "config.parse_error",
            Self::InvalidValue { .. } => "config.invalid_value",
            Self::VersionFileUnreadable { .. } => "config.version_file_unreadable",
            Self::UnknownOption { .. } => "config.unknown_option",
            Self::InvalidOptionValue { .. } => "config.invalid_option_value",
            Self::UnknownSetting { .. } => "config.unknown_setting",
            Self::WriteError { .. } => "config.write_error",
        };
        Some(code)
    }
}
