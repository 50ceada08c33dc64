//! Metadata a package publishes for its consumers

use crate::reference::Requirement;
use crate::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// File name of the serialized package info inside a package folder
pub const PACKAGE_INFO_FILE: &str = "package_info.json";

/// Property key holding a component's CMake target alias
pub const CMAKE_TARGET_NAME: &str = "cmake_target_name";

/// An independently linkable part of a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    #[serde(default)]
    pub libs: Vec<String>,
    #[serde(default = "default_includedirs")]
    pub includedirs: Vec<String>,
    #[serde(default = "default_libdirs")]
    pub libdirs: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl Component {
    #[must_use]
    pub fn with_libs(libs: Vec<String>) -> Self {
        Self {
            libs,
            includedirs: default_includedirs(),
            libdirs: default_libdirs(),
            properties: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn cmake_target_name(&self) -> Option<&str> {
        self.properties.get(CMAKE_TARGET_NAME).map(String::as_str)
    }
}

impl Default for Component {
    fn default() -> Self {
        Self::with_libs(Vec::new())
    }
}

fn default_includedirs() -> Vec<String> {
    vec!["include".to_string()]
}

fn default_libdirs() -> Vec<String> {
    vec!["lib".to_string()]
}

/// Everything a downstream recipe needs to consume a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: Version,
    #[serde(default)]
    pub components: BTreeMap<String, Component>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<Requirement>,
}

impl PackageInfo {
    #[must_use]
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    /// Libraries of every component, in component order
    #[must_use]
    pub fn all_libs(&self) -> Vec<String> {
        self.components
            .values()
            .flat_map(|component| component.libs.iter().cloned())
            .collect()
    }

    /// Include directories of every component, deduplicated
    #[must_use]
    pub fn all_includedirs(&self) -> Vec<String> {
        let mut dirs: Vec<String> = Vec::new();
        for dir in self.components.values().flat_map(|c| c.includedirs.iter()) {
            if !dirs.contains(dir) {
                dirs.push(dir.clone());
            }
        }
        dirs
    }

    /// Library directories of every component, deduplicated
    #[must_use]
    pub fn all_libdirs(&self) -> Vec<String> {
        let mut dirs: Vec<String> = Vec::new();
        for dir in self.components.values().flat_map(|c| c.libdirs.iter()) {
            if !dirs.contains(dir) {
                dirs.push(dir.clone());
            }
        }
        dirs
    }
}
