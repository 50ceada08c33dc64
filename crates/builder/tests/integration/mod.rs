//! Shared fixtures for builder integration tests

mod cmake_e2e;
mod driver;
mod recipe_files;

use async_trait::async_trait;
use irrpkg_builder::{BuildContext, BuildSystem, BuildSystemContext};
use irrpkg_errors::{BuildError, Error};
use irrpkg_types::{PackageInfo, Settings, PACKAGE_INFO_FILE};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const ENGINE_CMAKELISTS: &str = r"cmake_minimum_required(VERSION 3.16)
project(irrlicht-engine
  VERSION 3.4.5
  LANGUAGES CXX)

find_package(irrlicht CONFIG REQUIRED)
add_subdirectory(src)
";

/// Write a file, creating parent folders
pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// A recipe folder laid out like the irrlicht-engine sources
pub fn engine_sources(root: &Path, cmakelists: &str) {
    write(root, "CMakeLists.txt", cmakelists);
    write(root, "LICENSE.md", "MIT License\n");
    write(root, "include/irrlicht-engine/engine.h", "#pragma once\n");
    write(root, "src/CMakeLists.txt", "add_library(irrlicht-engine engine.cpp)\n");
    write(root, "src/engine.cpp", "int engine() { return 0; }\n");
    write(
        root,
        "irrlicht-engine-config.cmake.in",
        "include(${CMAKE_CURRENT_LIST_DIR}/irrlicht-engine-targets.cmake)\n",
    );
    write(root, "test_package/main.cpp", "int main() {}\n");
}

/// Publish `irrlicht/1.8.4@mpusz/testing` into a cache root
pub fn publish_irrlicht(cache: &Path) -> PathBuf {
    let folder = cache.join("irrlicht/1.8.4/mpusz/testing/package/0a1b2c");
    std::fs::create_dir_all(folder.join("include")).unwrap();
    std::fs::create_dir_all(folder.join("lib")).unwrap();
    let info = serde_json::json!({
        "name": "irrlicht",
        "version": "1.8.4",
        "components": {
            "irrlicht": { "libs": ["Irrlicht"] }
        }
    });
    std::fs::write(folder.join(PACKAGE_INFO_FILE), info.to_string()).unwrap();
    folder
}

pub fn settings(os: &str) -> Settings {
    let mut settings = Settings::detect();
    settings.set("os", os).unwrap();
    settings.set("arch", "x86_64").unwrap();
    settings
}

pub fn context(recipe: &Path, cache: &Path, work: &Path, os: &str) -> BuildContext {
    BuildContext::new(recipe.to_path_buf(), cache.to_path_buf())
        .with_settings(settings(os))
        .with_build_root(work.to_path_buf())
        .with_jobs(2)
}

pub fn read_package_info(package_folder: &Path) -> PackageInfo {
    let json = std::fs::read_to_string(package_folder.join(PACKAGE_INFO_FILE)).unwrap();
    serde_json::from_str(&json).unwrap()
}

/// Build system double that records calls and installs a canned tree
#[derive(Default)]
pub struct ScriptedBuild {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub contexts: Arc<Mutex<Vec<BuildSystemContext>>>,
    pub fail_configure: Option<String>,
}

impl ScriptedBuild {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str, ctx: &BuildSystemContext) {
        self.calls.lock().unwrap().push(call.to_string());
        self.contexts.lock().unwrap().push(ctx.clone());
    }
}

#[async_trait]
impl BuildSystem for ScriptedBuild {
    async fn detect(&self, source_dir: &Path) -> Result<bool, Error> {
        Ok(source_dir.join("CMakeLists.txt").exists())
    }

    async fn configure(&self, ctx: &BuildSystemContext, _args: &[String]) -> Result<(), Error> {
        self.record("configure", ctx);
        if let Some(stderr) = &self.fail_configure {
            return Err(BuildError::ConfigureFailed {
                message: stderr.clone(),
            }
            .into());
        }
        std::fs::create_dir_all(&ctx.build_dir)?;
        Ok(())
    }

    async fn build(&self, ctx: &BuildSystemContext, _args: &[String]) -> Result<(), Error> {
        self.record("build", ctx);
        Ok(())
    }

    async fn install(&self, ctx: &BuildSystemContext) -> Result<(), Error> {
        self.record("install", ctx);
        let pkg = &ctx.package_dir;
        write(pkg, "include/irrlicht-engine/engine.h", "#pragma once\n");
        write(pkg, "lib/libirrlicht-engine.a", "");
        write(
            pkg,
            "lib/cmake/irrlicht-engine/irrlicht-engine-config.cmake",
            "# installed config\n",
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
