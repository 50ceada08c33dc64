//! Folder layout of a CMake based recipe

use irrpkg_types::Settings;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Where sources are read from and where build outputs are written
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub source_folder: PathBuf,
    pub build_folder: PathBuf,
    pub generators_folder: PathBuf,
}

/// Standard CMake layout rooted at `base`
///
/// Single-config generators get one build folder per build type
/// (`<base>/build/<BuildType>`); multi-config generators share
/// `<base>/build`. Generated files always live in
/// `<build_folder>/generators`.
#[must_use]
pub fn cmake_layout(base: &Path, source_folder: &Path, settings: &Settings) -> Layout {
    let mut build_folder = base.join("build");
    if !settings.compiler.is_multi_config() {
        build_folder.push(settings.build_type.as_str());
    }
    let generators_folder = build_folder.join("generators");

    Layout {
        source_folder: source_folder.to_path_buf(),
        build_folder,
        generators_folder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use irrpkg_types::{BuildType, Os};

    #[test]
    fn single_config_nests_build_type() {
        let mut settings = Settings::detect();
        settings.set("os", "Linux").unwrap();
        settings.build_type = BuildType::Debug;

        let layout = cmake_layout(Path::new("/w"), Path::new("/w/src"), &settings);
        assert_eq!(layout.source_folder, PathBuf::from("/w/src"));
        assert_eq!(layout.build_folder, PathBuf::from("/w/build/Debug"));
        assert_eq!(
            layout.generators_folder,
            PathBuf::from("/w/build/Debug/generators")
        );
    }

    #[test]
    fn msvc_shares_one_build_folder() {
        let mut settings = Settings::detect();
        settings.set("os", "Windows").unwrap();
        assert_eq!(settings.os, Os::Windows);

        let layout = cmake_layout(Path::new("/w"), Path::new("/w/src"), &settings);
        assert_eq!(layout.build_folder, PathBuf::from("/w/build"));
        assert_eq!(layout.generators_folder, PathBuf::from("/w/build/generators"));
    }
}
