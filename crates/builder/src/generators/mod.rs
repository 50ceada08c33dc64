//! CMake integration files written before configure
//!
//! The toolchain file carries settings and options into CMake; one config
//! file per dependency lets `find_package(<name> CONFIG)` locate it.

mod deps;
mod toolchain;

pub use deps::generate_dependency_configs;
pub use toolchain::{generate_toolchain, TOOLCHAIN_FILE};

use irrpkg_errors::{BuildError, Error};
use std::path::Path;

/// Render a path the way CMake expects it on every platform
pub(crate) fn cmake_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}

async fn write_generated(path: &Path, content: String, generator: &str) -> Result<(), Error> {
    tokio::fs::write(path, content).await.map_err(|e| {
        BuildError::GeneratorFailed {
            generator: generator.to_string(),
            message: format!("{}: {e}", path.display()),
        }
        .into()
    })
}
