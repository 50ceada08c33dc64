//! Per-dependency CMake config files

use super::{cmake_path, write_generated};
use crate::dependencies::ResolvedDependency;
use irrpkg_errors::Error;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

fn joined(dep: &ResolvedDependency, dirs: &[String]) -> String {
    dirs.iter()
        .map(|dir| cmake_path(&dep.package_folder.join(dir)))
        .collect::<Vec<_>>()
        .join(";")
}

fn render(dep: &ResolvedDependency) -> String {
    let name = &dep.info.name;
    let target = dep.cmake_target();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "# Config for {}, generated by irrpkg",
        dep.requirement.reference
    );
    let _ = writeln!(out, "set({name}_FOUND TRUE)");
    let _ = writeln!(out, "set({name}_VERSION \"{}\")", dep.info.version);
    out.push('\n');
    let _ = writeln!(out, "if(NOT TARGET {target})");
    let _ = writeln!(out, "  add_library({target} INTERFACE IMPORTED)");
    let _ = writeln!(out, "  set_target_properties({target} PROPERTIES");
    let _ = writeln!(
        out,
        "    INTERFACE_INCLUDE_DIRECTORIES \"{}\"",
        joined(dep, &dep.info.all_includedirs())
    );
    let _ = writeln!(
        out,
        "    INTERFACE_LINK_DIRECTORIES \"{}\"",
        joined(dep, &dep.info.all_libdirs())
    );
    let _ = writeln!(
        out,
        "    INTERFACE_LINK_LIBRARIES \"{}\")",
        dep.info.all_libs().join(";")
    );
    out.push_str("endif()\n");
    out
}

/// Write `<name>-config.cmake` for every dependency into `generators_dir`
///
/// # Errors
///
/// Returns `BuildError::GeneratorFailed` if a file cannot be written.
pub async fn generate_dependency_configs(
    generators_dir: &Path,
    dependencies: &[ResolvedDependency],
) -> Result<Vec<PathBuf>, Error> {
    let mut written = Vec::with_capacity(dependencies.len());
    for dep in dependencies {
        let path = generators_dir.join(format!("{}-config.cmake", dep.info.name));
        write_generated(&path, render(dep), "deps").await?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use irrpkg_types::{Component, PackageInfo, Requirement, Version};
    use std::collections::BTreeMap;

    fn irrlicht() -> ResolvedDependency {
        ResolvedDependency {
            requirement: Requirement::transitive("irrlicht/1.8.4@mpusz/testing".parse().unwrap()),
            package_folder: PathBuf::from("/cache/irrlicht/pkg"),
            info: PackageInfo {
                name: "irrlicht".to_string(),
                version: Version::new(1, 8, 4),
                components: BTreeMap::from([(
                    "irrlicht".to_string(),
                    Component::with_libs(vec!["Irrlicht".to_string()]),
                )]),
                requires: Vec::new(),
            },
        }
    }

    #[test]
    fn config_declares_imported_target() {
        let text = render(&irrlicht());
        assert!(text.contains("add_library(irrlicht::irrlicht INTERFACE IMPORTED)"));
        assert!(text.contains("INTERFACE_INCLUDE_DIRECTORIES \"/cache/irrlicht/pkg/include\""));
        assert!(text.contains("INTERFACE_LINK_DIRECTORIES \"/cache/irrlicht/pkg/lib\""));
        assert!(text.contains("INTERFACE_LINK_LIBRARIES \"Irrlicht\")"));
        assert!(text.contains("set(irrlicht_VERSION \"1.8.4\")"));
    }

    #[tokio::test]
    async fn one_file_per_dependency() {
        let dir = tempfile::TempDir::new().unwrap();
        let written = generate_dependency_configs(dir.path(), &[irrlicht()])
            .await
            .unwrap();
        assert_eq!(written, [dir.path().join("irrlicht-config.cmake")]);
        assert!(written[0].exists());
    }
}
