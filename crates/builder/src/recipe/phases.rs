//! The ordered phases a recipe is driven through

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of recipe evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    SetVersion,
    ConfigOptions,
    Requirements,
    Layout,
    Build,
    Package,
    PackageInfo,
}

impl Phase {
    /// Every phase, in execution order
    pub const ORDER: [Phase; 7] = [
        Phase::SetVersion,
        Phase::ConfigOptions,
        Phase::Requirements,
        Phase::Layout,
        Phase::Build,
        Phase::Package,
        Phase::PackageInfo,
    ];

    /// Phases that evaluate metadata without touching the build tree
    pub const METADATA: [Phase; 4] = [
        Phase::SetVersion,
        Phase::ConfigOptions,
        Phase::Requirements,
        Phase::PackageInfo,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SetVersion => "set_version",
            Self::ConfigOptions => "config_options",
            Self::Requirements => "requirements",
            Self::Layout => "layout",
            Self::Build => "build",
            Self::Package => "package",
            Self::PackageInfo => "package_info",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
