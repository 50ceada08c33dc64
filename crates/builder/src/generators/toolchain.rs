//! Toolchain file generator

use super::{cmake_path, write_generated};
use crate::dependencies::ResolvedDependency;
use irrpkg_errors::{BuildError, Error};
use irrpkg_types::{OptionName, OptionValues, Settings};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// File name of the generated toolchain inside the generators folder
pub const TOOLCHAIN_FILE: &str = "irrpkg_toolchain.cmake";

// Pinned so GNUInstallDirs never installs into lib64
const INSTALL_DIRS: [(&str, &str); 3] = [
    ("CMAKE_INSTALL_BINDIR", "bin"),
    ("CMAKE_INSTALL_LIBDIR", "lib"),
    ("CMAKE_INSTALL_INCLUDEDIR", "include"),
];

fn on_off(value: bool) -> &'static str {
    if value {
        "ON"
    } else {
        "OFF"
    }
}

fn render(
    package: &str,
    generators_dir: &Path,
    settings: &Settings,
    options: &OptionValues,
    dependencies: &[ResolvedDependency],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Toolchain for {package}, generated by irrpkg");
    let _ = writeln!(
        out,
        "# os={} arch={} compiler={}",
        settings.os, settings.arch, settings.compiler
    );
    out.push('\n');

    if !settings.compiler.is_multi_config() {
        let _ = writeln!(
            out,
            "set(CMAKE_BUILD_TYPE \"{}\" CACHE STRING \"\" FORCE)",
            settings.build_type
        );
    }
    let _ = writeln!(
        out,
        "set(BUILD_SHARED_LIBS {} CACHE BOOL \"\" FORCE)",
        on_off(options.shared())
    );
    if let Some(fpic) = options.get(OptionName::Fpic) {
        let _ = writeln!(
            out,
            "set(CMAKE_POSITION_INDEPENDENT_CODE {} CACHE BOOL \"\" FORCE)",
            on_off(fpic)
        );
    }
    for (variable, dir) in INSTALL_DIRS {
        let _ = writeln!(out, "set({variable} \"{dir}\" CACHE PATH \"\" FORCE)");
    }
    out.push_str("set(CMAKE_FIND_PACKAGE_PREFER_CONFIG ON)\n");

    let mut prefixes = vec![format!("\"{}\"", cmake_path(generators_dir))];
    prefixes.extend(
        dependencies
            .iter()
            .map(|dep| format!("\"{}\"", cmake_path(&dep.package_folder))),
    );
    let _ = writeln!(out, "list(PREPEND CMAKE_PREFIX_PATH {})", prefixes.join(" "));
    out
}

/// Write the toolchain file into `generators_dir`
///
/// # Errors
///
/// Returns `BuildError::GeneratorFailed` if the file cannot be written.
pub async fn generate_toolchain(
    package: &str,
    generators_dir: &Path,
    settings: &Settings,
    options: &OptionValues,
    dependencies: &[ResolvedDependency],
) -> Result<PathBuf, Error> {
    tokio::fs::create_dir_all(generators_dir)
        .await
        .map_err(|e| BuildError::GeneratorFailed {
            generator: "toolchain".to_string(),
            message: format!("{}: {e}", generators_dir.display()),
        })?;

    let path = generators_dir.join(TOOLCHAIN_FILE);
    let content = render(package, generators_dir, settings, options, dependencies);
    write_generated(&path, content, "toolchain").await?;
    Ok(path)
}
