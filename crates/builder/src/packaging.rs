//! Populating the package folder

use irrpkg_errors::{BuildError, Error};
use irrpkg_events::{AppEvent, EventEmitter, PackageEvent};
use irrpkg_types::{PackageInfo, PACKAGE_INFO_FILE};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Copy the license into `<package_folder>/licenses`
///
/// # Errors
///
/// Returns `BuildError::MissingLicense` when the source folder has no
/// license file.
pub async fn copy_license(
    source_folder: &Path,
    license_file: &str,
    package_folder: &Path,
    emitter: &impl EventEmitter,
) -> Result<PathBuf, Error> {
    let from = source_folder.join(license_file);
    if !fs::try_exists(&from).await? {
        return Err(BuildError::MissingLicense {
            path: from.display().to_string(),
        }
        .into());
    }

    let licenses = package_folder.join("licenses");
    fs::create_dir_all(&licenses)
        .await
        .map_err(|e| Error::io_with_path(&e, &licenses))?;

    let file_name = Path::new(license_file)
        .file_name()
        .map_or_else(|| license_file.into(), PathBuf::from);
    let to = licenses.join(file_name);
    fs::copy(&from, &to)
        .await
        .map_err(|e| Error::io_with_path(&e, &from))?;

    emitter.emit(AppEvent::Package(PackageEvent::FileCopied {
        from,
        to: to.clone(),
    }));
    Ok(to)
}

/// Remove `<package_folder>/<relative>` recursively
///
/// A directory that does not exist is not an error. Returns whether
/// anything was removed.
///
/// # Errors
///
/// Returns `BuildError::PackagingFailed` for paths escaping the package
/// folder and an I/O error if removal fails.
pub async fn prune_directory(
    package_folder: &Path,
    relative: &str,
    emitter: &impl EventEmitter,
) -> Result<bool, Error> {
    let relative_path = Path::new(relative);
    if relative_path.is_absolute()
        || relative_path
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return Err(BuildError::PackagingFailed {
            message: format!("refusing to prune `{relative}` outside the package folder"),
        }
        .into());
    }

    let path = package_folder.join(relative_path);
    let existed = match fs::remove_dir_all(&path).await {
        Ok(()) => true,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => return Err(Error::io_with_path(&e, &path)),
    };

    emitter.emit(AppEvent::Package(PackageEvent::DirectoryPruned { path, existed }));
    Ok(existed)
}

/// Serialize package info next to the packaged files
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub async fn write_package_info(
    package_folder: &Path,
    info: &PackageInfo,
    emitter: &impl EventEmitter,
) -> Result<PathBuf, Error> {
    fs::create_dir_all(package_folder)
        .await
        .map_err(|e| Error::io_with_path(&e, package_folder))?;

    let path = package_folder.join(PACKAGE_INFO_FILE);
    let json = serde_json::to_string_pretty(info)?;
    fs::write(&path, json)
        .await
        .map_err(|e| Error::io_with_path(&e, &path))?;

    emitter.emit(AppEvent::Package(PackageEvent::PackageInfoPublished {
        package: format!("{}/{}", info.name, info.version),
        path: path.clone(),
        components: info.components.keys().cloned().collect(),
    }));
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use irrpkg_events::EventSender;
    use tempfile::TempDir;

    struct Silent;

    impl EventEmitter for Silent {
        fn event_sender(&self) -> Option<&EventSender> {
            None
        }
    }

    #[tokio::test]
    async fn license_lands_in_licenses_folder() {
        let source = TempDir::new().unwrap();
        std::fs::write(source.path().join("LICENSE.md"), "MIT").unwrap();
        let package = TempDir::new().unwrap();

        let copied = copy_license(source.path(), "LICENSE.md", package.path(), &Silent)
            .await
            .unwrap();
        assert_eq!(copied, package.path().join("licenses/LICENSE.md"));
        assert_eq!(std::fs::read_to_string(copied).unwrap(), "MIT");
    }

    #[tokio::test]
    async fn missing_license_is_an_error() {
        let source = TempDir::new().unwrap();
        let package = TempDir::new().unwrap();
        let err = copy_license(source.path(), "LICENSE.md", package.path(), &Silent)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Build(BuildError::MissingLicense { .. })
        ));
    }

    #[tokio::test]
    async fn prune_tolerates_missing_directory() {
        let package = TempDir::new().unwrap();
        assert!(!prune_directory(package.path(), "lib/cmake", &Silent)
            .await
            .unwrap());

        std::fs::create_dir_all(package.path().join("lib/cmake/irrlicht-engine")).unwrap();
        std::fs::write(package.path().join("lib/libirrlicht-engine.a"), "").unwrap();
        assert!(prune_directory(package.path(), "lib/cmake", &Silent)
            .await
            .unwrap());
        assert!(!package.path().join("lib/cmake").exists());
        assert!(package.path().join("lib/libirrlicht-engine.a").exists());
    }

    #[tokio::test]
    async fn prune_rejects_escaping_paths() {
        let package = TempDir::new().unwrap();
        assert!(prune_directory(package.path(), "../elsewhere", &Silent)
            .await
            .is_err());
    }
}
