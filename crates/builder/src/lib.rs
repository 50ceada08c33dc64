#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]
//! Recipe evaluation and packaging for irrpkg
//!
//! A recipe is driven through a fixed list of phases: resolve the version,
//! compute options, declare requirements, lay out the build tree, build with
//! CMake, stage the package folder and publish package info.

mod build_systems;
mod context;
mod dependencies;
mod environment;
mod exports;
mod generators;
mod layout;
mod package_id;
mod packaging;
mod recipe;
mod staged_executor;

pub use build_systems::{BuildSystem, BuildSystemContext, CMakeBuildSystem};
pub use context::BuildContext;
pub use dependencies::{DependencyResolver, ResolvedDependency};
pub use environment::{BuildCommandResult, BuildEnvironment};
pub use exports::export_sources;
pub use generators::{generate_dependency_configs, generate_toolchain, TOOLCHAIN_FILE};
pub use layout::{cmake_layout, Layout};
pub use package_id::compute_package_id;
pub use packaging::{copy_license, prune_directory, write_package_info};
pub use recipe::parser::{load_recipe, parse_recipe_from_string, RECIPE_FILE};
pub use recipe::phases::Phase;
pub use recipe::version::{extract_project_version, read_project_version};
pub use recipe::RecipeDefinition;
pub use staged_executor::{RecipeDriver, RecipeReport};
