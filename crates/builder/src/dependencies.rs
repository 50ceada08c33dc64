//! Lookup of already-built dependencies in the local package cache
//!
//! Packages live under `<cache>/<name>/<version>/<user>/<channel>/package/<id>`
//! where a missing user or channel is written as `_`. Nothing here builds or
//! fetches a package; a requirement is either present or an error.

use irrpkg_errors::{Error, PackageError};
use irrpkg_events::{EventEmitter, EventSender};
use irrpkg_types::{Component, PackageInfo, PackageRef, Requirement, PACKAGE_INFO_FILE};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Folder holding every revision of a reference in the cache
#[must_use]
pub fn reference_folder(cache_root: &Path, reference: &PackageRef) -> PathBuf {
    cache_root
        .join(&reference.name)
        .join(reference.version.as_str())
        .join(reference.user_or_placeholder())
        .join(reference.channel_or_placeholder())
}

/// A requirement located in the cache
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedDependency {
    pub requirement: Requirement,
    pub package_folder: PathBuf,
    pub info: PackageInfo,
}

impl ResolvedDependency {
    /// CMake target consumers link against
    ///
    /// Uses the first component that declares a `cmake_target_name`, falling
    /// back to `<name>::<name>`.
    #[must_use]
    pub fn cmake_target(&self) -> String {
        self.info
            .components
            .values()
            .find_map(Component::cmake_target_name)
            .map_or_else(
                || format!("{0}::{0}", self.info.name),
                ToString::to_string,
            )
    }
}

/// Resolves requirements against a cache root
#[derive(Clone, Debug)]
pub struct DependencyResolver {
    cache_root: PathBuf,
    event_sender: Option<EventSender>,
}

impl EventEmitter for DependencyResolver {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl DependencyResolver {
    #[must_use]
    pub fn new(cache_root: PathBuf) -> Self {
        Self {
            cache_root,
            event_sender: None,
        }
    }

    #[must_use]
    pub fn with_event_sender(mut self, event_sender: Option<EventSender>) -> Self {
        self.event_sender = event_sender;
        self
    }

    /// Locate every requirement, in declaration order
    ///
    /// # Errors
    ///
    /// Returns the first lookup failure.
    pub async fn resolve_all(
        &self,
        requirements: &[Requirement],
    ) -> Result<Vec<ResolvedDependency>, Error> {
        let mut resolved = Vec::with_capacity(requirements.len());
        for requirement in requirements {
            resolved.push(self.resolve(requirement).await?);
        }
        Ok(resolved)
    }

    /// Locate a single requirement
    ///
    /// When several package ids exist for the reference the lexically first
    /// one is used.
    ///
    /// # Errors
    ///
    /// Returns `PackageError::DependencyNotFound` when no package folder
    /// exists and `PackageError::InvalidPackageInfo` when the published
    /// metadata cannot be read or names a different package.
    pub async fn resolve(&self, requirement: &Requirement) -> Result<ResolvedDependency, Error> {
        let reference = &requirement.reference;
        let packages = reference_folder(&self.cache_root, reference).join("package");

        let not_found = || PackageError::DependencyNotFound {
            reference: reference.to_string(),
            cache: self.cache_root.display().to_string(),
        };

        let mut entries = match fs::read_dir(&packages).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found().into()),
            Err(e) => return Err(Error::io_with_path(&e, &packages)),
        };

        let mut candidates = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                candidates.push(entry.path());
            }
        }
        candidates.sort();
        let package_folder = candidates.into_iter().next().ok_or_else(not_found)?;

        let info = read_package_info(&package_folder, reference).await?;
        self.emit_debug(format!(
            "resolved {reference} at {}",
            package_folder.display()
        ));

        Ok(ResolvedDependency {
            requirement: requirement.clone(),
            package_folder,
            info,
        })
    }
}

/// Read `package_info.json`, or synthesize a single-library description
/// for packages that never published one
async fn read_package_info(
    package_folder: &Path,
    reference: &PackageRef,
) -> Result<PackageInfo, Error> {
    let path = package_folder.join(PACKAGE_INFO_FILE);
    let invalid = |message: String| PackageError::InvalidPackageInfo {
        reference: reference.to_string(),
        message,
    };

    let content = match fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(PackageInfo {
                name: reference.name.clone(),
                version: reference.version.clone(),
                components: BTreeMap::from([(
                    reference.name.clone(),
                    Component::with_libs(vec![reference.name.clone()]),
                )]),
                requires: Vec::new(),
            });
        }
        Err(e) => return Err(invalid(e.to_string()).into()),
    };

    let info: PackageInfo =
        serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;
    if info.name != reference.name {
        return Err(invalid(format!("package info names `{}`", info.name)).into());
    }
    Ok(info)
}
