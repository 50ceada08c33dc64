//! Build and packaging error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum BuildError {
    #[error("recipe error: {message}")]
    RecipeError { message: String },

    #[error("build tool not found: {program}")]
    ToolNotFound { program: String },

    #[error("configure failed: {message}")]
    ConfigureFailed { message: String },

    #[error("compile failed: {message}")]
    CompileFailed { message: String },

    #[error("install failed: {message}")]
    InstallFailed { message: String },

    #[error("export failed: {message}")]
    ExportFailed { message: String },

    #[error("generator {generator} failed: {message}")]
    GeneratorFailed { generator: String, message: String },

    #[error("packaging failed: {message}")]
    PackagingFailed { message: String },

    #[error("missing license file: {path}")]
    MissingLicense { path: String },

    #[error("phase {phase} requires {requires} to run first")]
    PhaseOutOfOrder { phase: String, requires: String },
}

impl UserFacingError for BuildError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ToolNotFound { .. } => {
                Some("Install CMake or point `build.cmake_program` at an existing binary.")
            }
            Self::ConfigureFailed { .. } | Self::CompileFailed { .. } => {
                Some("Inspect the tool output above; the failure is reported unmodified.")
            }
            Self::MissingLicense { .. } => {
                Some("Ship a LICENSE.md next to the recipe so it can be packaged.")
            }
            Self::RecipeError { .. } => Some("Correct the recipe definition before retrying."),
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::RecipeError { .. } => "build.recipe_error",
            Self::ToolNotFound { .. } => "build.tool_not_found",
            Self::ConfigureFailed { .. } => "build.configure_failed",
            Self::CompileFailed { .. } => "build.compile_failed",
            Self::InstallFailed { .. } => "build.install_failed",
            Self::ExportFailed { .. } => "build.export_failed",
            Self::GeneratorFailed { .. } => "build.generator_failed",
            Self::PackagingFailed { .. } => "build.packaging_failed",
            Self::MissingLicense { .. } => "build.missing_license",
            Self::PhaseOutOfOrder { .. } => "build.phase_out_of_order",
        };
        Some(code)
    }
}
