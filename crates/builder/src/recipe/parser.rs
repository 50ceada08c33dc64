//! YAML recipe parser with validation

use super::RecipeDefinition;
use irrpkg_errors::{BuildError, Error, PackageError};
use std::path::Path;

/// Recipe file looked up in a recipe folder
pub const RECIPE_FILE: &str = "irrpkg.yml";

/// Load the recipe for `recipe_folder`
///
/// Uses `explicit` when given, then `<recipe_folder>/irrpkg.yml` when it
/// exists, and the built-in irrlicht-engine recipe otherwise.
///
/// # Errors
///
/// Returns an error if a recipe file exists but cannot be read, parsed or
/// validated.
pub async fn load_recipe(
    recipe_folder: &Path,
    explicit: Option<&Path>,
) -> Result<RecipeDefinition, Error> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = recipe_folder.join(RECIPE_FILE);
            if !candidate.exists() {
                return Ok(RecipeDefinition::irrlicht_engine());
            }
            candidate
        }
    };

    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| BuildError::RecipeError {
            message: format!("failed to read recipe {}: {e}", path.display()),
        })?;

    parse_recipe_from_string(&content)
}

/// Parse a YAML recipe from a string
///
/// # Errors
///
/// Returns an error if:
/// - The YAML is invalid or a requirement is not an exact reference
/// - `name` or `version_file` is empty
/// - No component is declared
pub fn parse_recipe_from_string(content: &str) -> Result<RecipeDefinition, Error> {
    let recipe: RecipeDefinition =
        serde_yml::from_str(content).map_err(|e| BuildError::RecipeError {
            message: format!("failed to parse YAML: {e}"),
        })?;

    validate_recipe(&recipe)?;

    Ok(recipe)
}

fn validate_recipe(recipe: &RecipeDefinition) -> Result<(), Error> {
    if recipe.identity.name.is_empty() {
        return Err(BuildError::RecipeError {
            message: "name cannot be empty".to_string(),
        }
        .into());
    }

    if recipe.version_file.is_empty() {
        return Err(BuildError::RecipeError {
            message: "version_file cannot be empty".to_string(),
        }
        .into());
    }

    if recipe.components.is_empty() {
        return Err(PackageError::NoComponents.into());
    }

    if let Some(pattern) = recipe
        .exports_sources
        .iter()
        .find(|pattern| globset::Glob::new(pattern).is_err())
    {
        return Err(BuildError::RecipeError {
            message: format!("invalid export pattern `{pattern}`"),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGINE_YAML: &str = r#"
name: irrlicht-engine
author: Train IT
license: MIT License
homepage: https://train-it.eu
description: "Modern C++ Design: Part 1 Workshop - engine"
requires:
  - reference: irrlicht/1.8.4@mpusz/testing
exports_sources: ["include*", "src*", "CMakeLists.txt", "irrlicht-engine-config.cmake.in"]
components:
  engine:
    libs: [irrlicht-engine]
    properties:
      cmake_target_name: "irrlicht::engine"
"#;

    #[test]
    fn test_yaml_matches_builtin() {
        let parsed = parse_recipe_from_string(ENGINE_YAML).unwrap();
        assert_eq!(parsed, RecipeDefinition::irrlicht_engine());
    }

    #[test]
    fn test_range_requirement_rejected() {
        let yaml = ENGINE_YAML.replace("irrlicht/1.8.4@", "irrlicht/[>=1.8]@");
        let err = parse_recipe_from_string(&yaml).unwrap_err();
        assert!(err.to_string().contains("failed to parse YAML"));
    }

    #[test]
    fn test_missing_components_rejected() {
        let yaml = "name: x\nauthor: a\nlicense: MIT\nhomepage: h\ndescription: d\ncomponents: {}\n";
        let err = parse_recipe_from_string(yaml).unwrap_err();
        assert!(matches!(err, Error::Package(PackageError::NoComponents)));
    }

    #[tokio::test]
    async fn test_builtin_used_without_recipe_file() {
        let dir = tempfile::tempdir().unwrap();
        let recipe = load_recipe(dir.path(), None).await.unwrap();
        assert_eq!(recipe.name(), "irrlicht-engine");
    }

    #[tokio::test]
    async fn test_recipe_file_in_folder_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = ENGINE_YAML.replace("name: irrlicht-engine", "name: other-engine");
        tokio::fs::write(dir.path().join(RECIPE_FILE), yaml)
            .await
            .unwrap();
        let recipe = load_recipe(dir.path(), None).await.unwrap();
        assert_eq!(recipe.name(), "other-engine");
    }
}
