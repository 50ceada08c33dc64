//! Version extraction from a CMake `project()` declaration

use irrpkg_errors::{ConfigError, Error, VersionError};
use irrpkg_types::Version;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static PROJECT_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"project\([^)]+VERSION\s+(\d+\.\d+\.\d+)[^)]*\)").expect("valid regex")
});

// Any token following VERSION inside project(); used to tell a malformed
// version apart from a missing one.
static PROJECT_VERSION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"project\([^)]+VERSION\s+([^)\s]*)").expect("valid regex"));

/// Extract the package version from build configuration text
///
/// `source` only labels errors.
///
/// # Errors
///
/// Returns `VersionError::MissingProjectVersion` when no `project(...)`
/// call carries a `VERSION` token and `VersionError::MalformedProjectVersion`
/// when the token is not a three-part numeric version. The matched text is
/// kept verbatim, so zero-padded or very large components are accepted.
pub fn extract_project_version(content: &str, source: &str) -> Result<Version, VersionError> {
    if let Some(captures) = PROJECT_VERSION.captures(content) {
        let raw = captures[1].trim();
        return Version::parse(raw).map_err(|_| VersionError::MalformedProjectVersion {
            path: source.to_string(),
            found: raw.to_string(),
        });
    }

    match PROJECT_VERSION_TOKEN.captures(content) {
        Some(captures) => Err(VersionError::MalformedProjectVersion {
            path: source.to_string(),
            found: captures[1].to_string(),
        }),
        None => Err(VersionError::MissingProjectVersion {
            path: source.to_string(),
        }),
    }
}

/// Read `file` from `recipe_folder` and extract its project version
///
/// # Errors
///
/// Returns `ConfigError::VersionFileUnreadable` if the file cannot be read,
/// otherwise the errors of [`extract_project_version`].
pub async fn read_project_version(recipe_folder: &Path, file: &str) -> Result<Version, Error> {
    let path = recipe_folder.join(file);
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| ConfigError::VersionFileUnreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    Ok(extract_project_version(&content, &path.display().to_string())?)
}
