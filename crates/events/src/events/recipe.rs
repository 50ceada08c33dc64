use super::FailureContext;
use irrpkg_types::{OptionValues, Version};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Recipe evaluation events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RecipeEvent {
    /// A phase is about to run
    PhaseStarted { recipe: String, phase: String },

    /// A phase finished successfully
    PhaseCompleted {
        recipe: String,
        phase: String,
        duration: Duration,
    },

    /// A phase failed; no later phase runs
    PhaseFailed {
        recipe: String,
        phase: String,
        failure: FailureContext,
    },

    /// Version extracted from the build configuration
    VersionResolved {
        recipe: String,
        version: Version,
        source: String,
    },

    /// Options resolved for the target platform
    OptionsResolved { recipe: String, options: OptionValues },

    /// A dependency edge was declared
    RequirementDeclared {
        recipe: String,
        reference: String,
        transitive_headers: bool,
        transitive_libs: bool,
        testing_channel: bool,
    },
}
