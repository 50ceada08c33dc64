//! Build system abstraction
//!
//! The driver only knows about the [`BuildSystem`] trait so that tests can
//! substitute a scripted implementation for CMake.

use async_trait::async_trait;
use irrpkg_errors::Error;
use std::path::Path;

mod cmake;
mod core;

pub use cmake::CMakeBuildSystem;
pub use core::BuildSystemContext;

/// Trait for build system implementations
#[async_trait]
pub trait BuildSystem: Send + Sync {
    /// Detect if this build system applies to the source directory
    async fn detect(&self, source_dir: &Path) -> Result<bool, Error>;

    /// Configure phase
    async fn configure(&self, ctx: &BuildSystemContext, args: &[String]) -> Result<(), Error>;

    /// Build phase
    async fn build(&self, ctx: &BuildSystemContext, args: &[String]) -> Result<(), Error>;

    /// Install the build tree into the package folder
    async fn install(&self, ctx: &BuildSystemContext) -> Result<(), Error>;

    /// Get build system name
    fn name(&self) -> &'static str;
}
