//! Shared context handed to every build system call

use crate::environment::{BuildCommandResult, BuildEnvironment};
use irrpkg_errors::Error;
use irrpkg_types::BuildType;
use std::path::{Path, PathBuf};

/// Everything a build system needs to configure, build and install
#[derive(Clone, Debug)]
pub struct BuildSystemContext {
    /// Build environment
    pub env: BuildEnvironment,
    /// Source directory
    pub source_dir: PathBuf,
    /// Build directory
    pub build_dir: PathBuf,
    /// Folder holding generated toolchain and dependency files
    pub generators_dir: PathBuf,
    /// Installation target
    pub package_dir: PathBuf,
    pub build_type: BuildType,
    /// Whether the generator holds all configurations in one build tree
    pub multi_config: bool,
    /// Number of parallel jobs
    pub jobs: usize,
    /// Toolchain file passed at configure time
    pub toolchain_file: Option<PathBuf>,
}

impl BuildSystemContext {
    /// Create a new build context
    pub fn new(env: BuildEnvironment, source_dir: PathBuf, build_dir: PathBuf) -> Self {
        let generators_dir = build_dir.join("generators");
        Self {
            env,
            package_dir: build_dir.join("package"),
            source_dir,
            build_dir,
            generators_dir,
            build_type: BuildType::default(),
            multi_config: false,
            jobs: 1,
            toolchain_file: None,
        }
    }

    #[must_use]
    pub fn with_generators_dir(mut self, generators_dir: PathBuf) -> Self {
        self.generators_dir = generators_dir;
        self
    }

    #[must_use]
    pub fn with_package_dir(mut self, package_dir: PathBuf) -> Self {
        self.package_dir = package_dir;
        self
    }

    #[must_use]
    pub fn with_build_type(mut self, build_type: BuildType, multi_config: bool) -> Self {
        self.build_type = build_type;
        self.multi_config = multi_config;
        self
    }

    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    #[must_use]
    pub fn with_toolchain_file(mut self, toolchain_file: PathBuf) -> Self {
        self.toolchain_file = Some(toolchain_file);
        self
    }

    /// Execute a command in the build context
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be started
    pub async fn execute(
        &self,
        program: &str,
        args: &[&str],
        working_dir: Option<&Path>,
    ) -> Result<BuildCommandResult, Error> {
        self.env.execute_command(program, args, working_dir).await
    }
}
