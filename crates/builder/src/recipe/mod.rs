//! Recipe definition and the pieces evaluated from it

pub mod parser;
pub mod phases;
pub mod version;

use irrpkg_errors::ConfigError;
use irrpkg_types::{
    available_options, Component, OptionDefaults, OptionName, OptionValues, Os, PackageInfo,
    PackageRef, RecipeIdentity, Requirement, Version, CMAKE_TARGET_NAME,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Declarative description of one package recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDefinition {
    #[serde(flatten)]
    pub identity: RecipeIdentity,

    /// File in the recipe folder carrying `project(... VERSION X.Y.Z)`
    #[serde(default = "default_version_file")]
    pub version_file: String,

    #[serde(default)]
    pub default_options: OptionDefaults,

    #[serde(default)]
    pub requires: Vec<Requirement>,

    #[serde(default = "default_license_file")]
    pub license_file: String,

    /// Glob patterns, relative to the recipe folder, copied before building
    #[serde(default)]
    pub exports_sources: Vec<String>,

    pub components: BTreeMap<String, Component>,

    /// Package-relative directories removed after install
    #[serde(default = "default_prune")]
    pub prune: Vec<String>,
}

fn default_version_file() -> String {
    "CMakeLists.txt".to_string()
}

fn default_license_file() -> String {
    "LICENSE.md".to_string()
}

fn default_prune() -> Vec<String> {
    vec!["lib/cmake".to_string()]
}

impl RecipeDefinition {
    /// The irrlicht-engine recipe
    #[must_use]
    pub fn irrlicht_engine() -> Self {
        let engine = Component::with_libs(vec!["irrlicht-engine".to_string()])
            .with_property(CMAKE_TARGET_NAME, "irrlicht::engine");

        Self {
            identity: RecipeIdentity::irrlicht_engine(),
            version_file: default_version_file(),
            default_options: OptionDefaults::default(),
            requires: vec![Requirement::transitive(PackageRef {
                name: "irrlicht".to_string(),
                version: Version::new(1, 8, 4),
                user: Some("mpusz".to_string()),
                channel: Some("testing".to_string()),
            })],
            license_file: default_license_file(),
            exports_sources: vec![
                "include*".to_string(),
                "src*".to_string(),
                "CMakeLists.txt".to_string(),
                "irrlicht-engine-config.cmake.in".to_string(),
            ],
            components: BTreeMap::from([("engine".to_string(), engine)]),
            prune: default_prune(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.identity.name
    }

    /// Option names this recipe exposes on `os`
    #[must_use]
    pub fn config_options(&self, os: Os) -> BTreeSet<OptionName> {
        available_options(os)
    }

    /// Resolve option values for `os` from the recipe defaults and overrides
    ///
    /// # Errors
    ///
    /// Returns an error when an override is unknown on `os` or not boolean.
    pub fn resolve_options<S: AsRef<str>>(
        &self,
        os: Os,
        overrides: &[(S, S)],
    ) -> Result<OptionValues, ConfigError> {
        OptionValues::resolve(os, self.default_options, overrides)
    }

    /// Dependency edges, in declaration order
    #[must_use]
    pub fn requirements(&self) -> &[Requirement] {
        &self.requires
    }

    /// Metadata published for consumers of the built package
    #[must_use]
    pub fn package_info(&self, version: Version) -> PackageInfo {
        PackageInfo {
            name: self.identity.name.clone(),
            version,
            components: self.components.clone(),
            requires: self.requires.clone(),
        }
    }
}

impl Default for RecipeDefinition {
    fn default() -> Self {
        Self::irrlicht_engine()
    }
}
