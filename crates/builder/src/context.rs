//! Build context for recipe evaluation

use irrpkg_config::{calculate_build_jobs, Config};
use irrpkg_errors::Error;
use irrpkg_events::{EventEmitter, EventSender};
use irrpkg_types::Settings;
use std::path::PathBuf;

/// Everything a recipe run needs besides the recipe itself
#[derive(Clone, Debug)]
pub struct BuildContext {
    /// Folder holding the recipe, `CMakeLists.txt` and `LICENSE.md`
    pub recipe_folder: PathBuf,
    /// Settings the recipe is evaluated against
    pub settings: Settings,
    /// `(option, value)` overrides, applied in order
    pub option_overrides: Vec<(String, String)>,
    /// Root of the local package cache
    pub cache_root: PathBuf,
    /// Explicit build folder; derived from the cache when `None`
    pub build_root: Option<PathBuf>,
    /// Copy export sources into a clean source folder before building
    pub exports: bool,
    /// Program used for configure/build/install
    pub cmake_program: String,
    /// Number of parallel build jobs
    pub jobs: usize,
    /// Event sender for progress reporting
    pub event_sender: Option<EventSender>,
}

impl EventEmitter for BuildContext {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl BuildContext {
    /// Create a context with host settings and default build behavior
    #[must_use]
    pub fn new(recipe_folder: PathBuf, cache_root: PathBuf) -> Self {
        Self {
            recipe_folder,
            settings: Settings::detect(),
            option_overrides: Vec::new(),
            cache_root,
            build_root: None,
            exports: true,
            cmake_program: "cmake".to_string(),
            jobs: calculate_build_jobs(0),
            event_sender: None,
        }
    }

    /// Create a context from loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured settings profile is invalid.
    pub fn from_config(config: &Config, recipe_folder: PathBuf) -> Result<Self, Error> {
        Ok(Self {
            recipe_folder,
            settings: config.settings.to_settings()?,
            option_overrides: Vec::new(),
            cache_root: config.cache_path(),
            build_root: config.build_path(),
            exports: config.build.exports,
            cmake_program: config.build.cmake_program.clone(),
            jobs: calculate_build_jobs(config.build.build_jobs),
            event_sender: None,
        })
    }

    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.option_overrides.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_build_root(mut self, build_root: PathBuf) -> Self {
        self.build_root = Some(build_root);
        self
    }

    #[must_use]
    pub fn with_exports(mut self, exports: bool) -> Self {
        self.exports = exports;
        self
    }

    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, event_sender: EventSender) -> Self {
        self.event_sender = Some(event_sender);
        self
    }
}
