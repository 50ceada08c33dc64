#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for irrpkg
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/irrpkg/config.toml)
//! - Environment variables
//! - CLI flags (applied by the caller)

use irrpkg_errors::{ConfigError, Error};
use irrpkg_types::{ColorChoice, Settings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub paths: PathConfig,

    /// Default profile; unset fields are detected from the host
    #[serde(default)]
    pub settings: SettingsConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_color_choice")]
    pub color: ColorChoice,
}

/// Build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_build_jobs")]
    pub build_jobs: usize, // 0 = auto-detect
    #[serde(default = "default_cmake_program")]
    pub cmake_program: String,
    /// Copy export sources into a clean folder before building
    #[serde(default = "default_exports")]
    pub exports: bool,
}

/// Path configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathConfig {
    pub cache_path: Option<PathBuf>,
    pub build_path: Option<PathBuf>,
}

/// Settings profile as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsConfig {
    pub os: Option<String>,
    pub arch: Option<String>,
    pub compiler: Option<String>,
    #[serde(rename = "compiler.version")]
    pub compiler_version: Option<String>,
    pub build_type: Option<String>,
}

// Default implementations

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::Auto,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            build_jobs: 0, // 0 = auto-detect
            cmake_program: default_cmake_program(),
            exports: true,
        }
    }
}

// Default value functions for serde
fn default_color_choice() -> ColorChoice {
    ColorChoice::Auto
}

fn default_build_jobs() -> usize {
    0 // 0 = auto-detect
}

fn default_cmake_program() -> String {
    "cmake".to_string()
}

fn default_exports() -> bool {
    true
}

impl SettingsConfig {
    /// Host settings with the configured fields applied on top
    ///
    /// `os` is applied first so a configured compiler is not reset by it.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured value is not recognized.
    pub fn to_settings(&self) -> Result<Settings, ConfigError> {
        let mut settings = Settings::detect();
        let fields = [
            ("os", &self.os),
            ("arch", &self.arch),
            ("compiler", &self.compiler),
            ("compiler.version", &self.compiler_version),
            ("build_type", &self.build_type),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                settings.set(key, value)?;
            }
        }
        Ok(settings)
    }
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("irrpkg").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            tracing::debug!(path = %config_path.display(), "loading configuration");
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // IRRPKG_CACHE
        if let Ok(cache) = std::env::var("IRRPKG_CACHE") {
            self.paths.cache_path = Some(PathBuf::from(cache));
        }

        // IRRPKG_JOBS
        if let Ok(jobs) = std::env::var("IRRPKG_JOBS") {
            self.build.build_jobs = jobs.parse().map_err(|_| ConfigError::InvalidValue {
                field: "IRRPKG_JOBS".to_string(),
                value: jobs,
            })?;
        }

        // IRRPKG_CMAKE
        if let Ok(cmake) = std::env::var("IRRPKG_CMAKE") {
            if cmake.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "IRRPKG_CMAKE".to_string(),
                    value: cmake,
                }
                .into());
            }
            self.build.cmake_program = cmake;
        }

        // IRRPKG_BUILD_TYPE
        if let Ok(build_type) = std::env::var("IRRPKG_BUILD_TYPE") {
            build_type
                .parse::<irrpkg_types::BuildType>()
                .map_err(|_| ConfigError::InvalidValue {
                    field: "IRRPKG_BUILD_TYPE".to_string(),
                    value: build_type.clone(),
                })?;
            self.settings.build_type = Some(build_type);
        }

        Ok(())
    }

    /// Root of the local package cache (with default)
    #[must_use]
    pub fn cache_path(&self) -> PathBuf {
        self.paths.cache_path.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".irrpkg")
                .join("p")
        })
    }

    /// Explicit build folder, if configured
    #[must_use]
    pub fn build_path(&self) -> Option<PathBuf> {
        self.paths.build_path.clone()
    }
}

/// Calculate build jobs based on CPU count
#[must_use]
pub fn calculate_build_jobs(config_value: usize) -> usize {
    if config_value > 0 {
        config_value // User override
    } else {
        num_cpus::get().max(1)
    }
}
