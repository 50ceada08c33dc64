//! Runs against a real CMake; `cargo test -- --ignored` with cmake and make on PATH
#![cfg(target_os = "linux")]

use super::*;
use irrpkg_builder::{CMakeBuildSystem, Phase, RecipeDefinition, RecipeDriver};
use tempfile::TempDir;

// Installs files only, so no compiler is needed.
const HEADER_ONLY_CMAKELISTS: &str = r"cmake_minimum_required(VERSION 3.15)
project(irrlicht-engine VERSION 3.4.5 LANGUAGES NONE)

find_package(irrlicht CONFIG REQUIRED)
include(GNUInstallDirs)

install(DIRECTORY include/ DESTINATION ${CMAKE_INSTALL_INCLUDEDIR})
install(FILES irrlicht-engine-config.cmake.in
        DESTINATION ${CMAKE_INSTALL_LIBDIR}/cmake/irrlicht-engine
        RENAME irrlicht-engine-config.cmake)
";

#[tokio::test]
#[ignore = "requires cmake and make on PATH"]
async fn cmake_packages_header_tree() {
    let recipe = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    engine_sources(recipe.path(), HEADER_ONLY_CMAKELISTS);
    publish_irrlicht(cache.path());

    let context = super::context(recipe.path(), cache.path(), work.path(), "Linux");
    let report = RecipeDriver::new(RecipeDefinition::irrlicht_engine(), context)
        .with_build_system(Arc::new(CMakeBuildSystem::new()))
        .run()
        .await
        .unwrap();

    assert_eq!(report.completed, Phase::ORDER);
    let package = report.package_folder.unwrap();
    assert!(package.join("include/irrlicht-engine/engine.h").is_file());
    assert!(package.join("licenses/LICENSE.md").is_file());
    assert!(!package.join("lib/cmake").exists());
    assert!(!package.join("lib64").exists());
    assert_eq!(read_package_info(&package).name, "irrlicht-engine");
}
