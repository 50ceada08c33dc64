use serde::{Deserialize, Serialize};

use irrpkg_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    /// Optional remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl FailureContext {
    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self {
            code: error.user_code().map(str::to_string),
            message: error.user_message().into_owned(),
            hint: error.user_hint().map(str::to_string),
        }
    }
}

pub mod build;
pub mod general;
pub mod package;
pub mod recipe;

pub use build::*;
pub use general::*;
pub use package::*;
pub use recipe::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, errors, operations)
    General(GeneralEvent),

    /// Recipe phase lifecycle and evaluation results
    Recipe(RecipeEvent),

    /// External build tool invocations
    Build(BuildEvent),

    /// Package folder population
    Package(PackageEvent),
}

impl AppEvent {
    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::General(GeneralEvent::Error { .. })
            | Self::Recipe(RecipeEvent::PhaseFailed { .. })
            | Self::Build(BuildEvent::CommandFailed { .. }) => Level::ERROR,

            Self::General(GeneralEvent::Warning { .. })
            | Self::Recipe(RecipeEvent::RequirementDeclared {
                testing_channel: true,
                ..
            }) => Level::WARN,

            Self::General(GeneralEvent::DebugLog { .. })
            | Self::Build(BuildEvent::OutputLine { .. })
            | Self::Package(PackageEvent::FileCopied { .. }) => Level::DEBUG,

            _ => Level::INFO,
        }
    }

    /// Get the log target for this event
    #[must_use]
    pub fn log_target(&self) -> &'static str {
        match self {
            Self::General(_) => "irrpkg::events::general",
            Self::Recipe(_) => "irrpkg::events::recipe",
            Self::Build(_) => "irrpkg::events::build",
            Self::Package(_) => "irrpkg::events::package",
        }
    }
}
