//! Copy the exported sources of a recipe into a clean folder

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use irrpkg_errors::{BuildError, Error};
use irrpkg_events::{AppEvent, EventEmitter, PackageEvent};
use std::path::{Path, PathBuf};
use tokio::fs;

fn export_failed(message: impl Into<String>) -> Error {
    BuildError::ExportFailed {
        message: message.into(),
    }
    .into()
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, Error> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| export_failed(format!("{pattern}: {e}")))?;
        builder.add(glob);
    }
    builder.build().map_err(|e| export_failed(e.to_string()))
}

/// Files below `recipe_folder` whose relative path matches `patterns`
///
/// Anything under `skip` is ignored so that an export folder placed inside
/// the recipe folder never exports itself.
fn matching_files(
    recipe_folder: &Path,
    patterns: &GlobSet,
    skip: Option<&Path>,
) -> Result<Vec<PathBuf>, Error> {
    let skip = skip.map(Path::to_path_buf);
    let walker = WalkBuilder::new(recipe_folder)
        .standard_filters(false)
        .filter_entry(move |entry| skip.as_ref().is_none_or(|skip| !entry.path().starts_with(skip)))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| export_failed(e.to_string()))?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(recipe_folder) else {
            continue;
        };
        if patterns.is_match(relative) {
            files.push(relative.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Export sources from `recipe_folder` into `export_folder`
///
/// The export folder is wiped first. `patterns` are matched against paths
/// relative to the recipe folder; `*` also matches `/`, so `include*` picks
/// up the whole `include/` tree. `license_file` is exported when present.
/// Returns the exported relative paths.
///
/// # Errors
///
/// Returns `BuildError::ExportFailed` on an invalid pattern or an
/// unreadable tree, and an I/O error if copying fails.
pub async fn export_sources(
    recipe_folder: &Path,
    export_folder: &Path,
    patterns: &[String],
    license_file: &str,
    skip: Option<&Path>,
    emitter: &impl EventEmitter,
) -> Result<Vec<PathBuf>, Error> {
    let globs = build_globset(patterns)?;
    let mut files = matching_files(recipe_folder, &globs, skip)?;
    let license = PathBuf::from(license_file);
    if !files.contains(&license) && fs::try_exists(recipe_folder.join(&license)).await? {
        files.push(license);
    }

    if fs::try_exists(export_folder).await? {
        fs::remove_dir_all(export_folder)
            .await
            .map_err(|e| Error::io_with_path(&e, export_folder))?;
    }
    fs::create_dir_all(export_folder)
        .await
        .map_err(|e| Error::io_with_path(&e, export_folder))?;

    for relative in &files {
        let from = recipe_folder.join(relative);
        let to = export_folder.join(relative);
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::copy(&from, &to)
            .await
            .map_err(|e| Error::io_with_path(&e, &from))?;
        emitter.emit(AppEvent::Package(PackageEvent::FileCopied { from, to }));
    }

    Ok(files)
}
