#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for irrpkg
//!
//! Settings, build options, package references and the metadata a recipe
//! publishes for its consumers.

pub mod identity;
pub mod options;
pub mod package_info;
pub mod reference;
pub mod settings;
pub mod version;

// Re-export commonly used types
pub use identity::RecipeIdentity;
pub use options::{available_options, OptionDefaults, OptionName, OptionValues};
pub use package_info::{Component, PackageInfo, CMAKE_TARGET_NAME, PACKAGE_INFO_FILE};
pub use reference::{PackageRef, Requirement};
pub use settings::{Arch, BuildType, Compiler, CompilerName, Os, Settings};
pub use version::Version;

use serde::{Deserialize, Serialize};

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Always,
    Auto,
    Never,
}

// Implement clap::ValueEnum for ColorChoice
impl clap::ValueEnum for ColorChoice {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Always, Self::Auto, Self::Never]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Always => clap::builder::PossibleValue::new("always"),
            Self::Auto => clap::builder::PossibleValue::new("auto"),
            Self::Never => clap::builder::PossibleValue::new("never"),
        })
    }
}

impl Default for ColorChoice {
    fn default() -> Self {
        Self::Auto
    }
}
