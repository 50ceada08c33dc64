//! Recipes loaded from `irrpkg.yml`

use super::*;
use irrpkg_builder::{load_recipe, RecipeDefinition, RecipeDriver, RECIPE_FILE};
use tempfile::TempDir;

const STANDALONE_RECIPE: &str = r#"
name: irrlicht-engine
author: Train IT
license: MIT License
homepage: https://train-it.eu
description: "Modern C++ Design: Part 1 Workshop - engine"
default_options:
  shared: true
exports_sources:
  - "include*"
  - "src*"
  - CMakeLists.txt
components:
  engine:
    libs: [irrlicht-engine]
    properties:
      cmake_target_name: "irrlicht::engine"
prune:
  - lib/cmake
  - share/doc
"#;

#[tokio::test]
async fn folder_without_recipe_file_uses_builtin() {
    let recipe = TempDir::new().unwrap();
    let loaded = load_recipe(recipe.path(), None).await.unwrap();
    assert_eq!(loaded, RecipeDefinition::irrlicht_engine());
}

#[tokio::test]
async fn recipe_file_drives_a_run_without_dependencies() {
    let recipe = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    engine_sources(recipe.path(), ENGINE_CMAKELISTS);
    write(recipe.path(), RECIPE_FILE, STANDALONE_RECIPE);

    let definition = load_recipe(recipe.path(), None).await.unwrap();
    assert!(definition.requires.is_empty());

    let build = Arc::new(ScriptedBuild::default());
    let context = super::context(recipe.path(), cache.path(), work.path(), "Linux");
    let report = RecipeDriver::new(definition, context)
        .with_build_system(build.clone())
        .run()
        .await
        .unwrap();

    assert!(report.options.unwrap().shared());
    let package = report.package_folder.unwrap();
    assert!(!package.join("lib/cmake").exists());
    assert!(read_package_info(&package).requires.is_empty());
    assert!(package.join("licenses/LICENSE.md").is_file());
    assert_eq!(build.calls(), ["configure", "build", "install"]);
}

#[tokio::test]
async fn ranged_requirement_is_rejected() {
    let recipe = TempDir::new().unwrap();
    let path = recipe.path().join("custom.yml");
    std::fs::write(
        &path,
        format!("{STANDALONE_RECIPE}requires:\n  - reference: \"irrlicht/[>=1.8 <2]\"\n"),
    )
    .unwrap();

    let err = load_recipe(recipe.path(), Some(&path)).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Build(BuildError::RecipeError { ref message })
            if message.contains("irrlicht/[>=1.8 <2]")
    ));
}
