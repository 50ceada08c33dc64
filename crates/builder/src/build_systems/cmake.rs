//! CMake build system implementation

use super::{BuildSystem, BuildSystemContext};
use async_trait::async_trait;
use irrpkg_errors::{BuildError, Error};
use std::path::{Path, PathBuf};
use tokio::fs;

/// CMake driven through its command line
#[derive(Clone, Debug)]
pub struct CMakeBuildSystem {
    program: String,
}

impl CMakeBuildSystem {
    /// Create a CMake build system using `cmake` from `PATH`
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("cmake")
    }

    /// Create a CMake build system using a specific program
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Locate the CMake executable
    ///
    /// # Errors
    ///
    /// Returns `BuildError::ToolNotFound` if the program is not on `PATH`.
    pub fn locate(&self) -> Result<PathBuf, Error> {
        which::which(&self.program).map_err(|_| {
            BuildError::ToolNotFound {
                program: self.program.clone(),
            }
            .into()
        })
    }

    /// Arguments for the configure step
    fn configure_args(ctx: &BuildSystemContext, user_args: &[String]) -> Vec<String> {
        let mut args = vec![
            "-S".to_string(),
            ctx.source_dir.display().to_string(),
            "-B".to_string(),
            ctx.build_dir.display().to_string(),
        ];

        if let Some(toolchain) = &ctx.toolchain_file {
            args.push(format!("-DCMAKE_TOOLCHAIN_FILE={}", toolchain.display()));
        }

        if !user_args
            .iter()
            .any(|arg| arg.starts_with("-DCMAKE_INSTALL_PREFIX="))
        {
            args.push(format!(
                "-DCMAKE_INSTALL_PREFIX={}",
                ctx.package_dir.display()
            ));
        }

        // Multi-config generators select the configuration at build time
        if !ctx.multi_config
            && !user_args
                .iter()
                .any(|arg| arg.starts_with("-DCMAKE_BUILD_TYPE="))
        {
            args.push(format!("-DCMAKE_BUILD_TYPE={}", ctx.build_type));
        }

        args.extend(user_args.iter().cloned());
        args
    }

    /// Arguments for the build step
    fn build_args(ctx: &BuildSystemContext, user_args: &[String]) -> Vec<String> {
        let mut args = vec!["--build".to_string(), ctx.build_dir.display().to_string()];

        if ctx.multi_config {
            args.push("--config".to_string());
            args.push(ctx.build_type.to_string());
        }

        if ctx.jobs > 1 {
            args.push("--parallel".to_string());
            args.push(ctx.jobs.to_string());
        }

        if !user_args.is_empty() {
            args.push("--".to_string());
            args.extend(user_args.iter().cloned());
        }
        args
    }

    /// Arguments for the install step
    fn install_args(ctx: &BuildSystemContext) -> Vec<String> {
        let mut args = vec!["--install".to_string(), ctx.build_dir.display().to_string()];
        if ctx.multi_config {
            args.push("--config".to_string());
            args.push(ctx.build_type.to_string());
        }
        args.push("--prefix".to_string());
        args.push(ctx.package_dir.display().to_string());
        args
    }

    async fn run(
        &self,
        ctx: &BuildSystemContext,
        args: &[String],
    ) -> Result<crate::BuildCommandResult, Error> {
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        ctx.execute(&self.program, &arg_refs, Some(&ctx.build_dir))
            .await
    }
}

impl Default for CMakeBuildSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BuildSystem for CMakeBuildSystem {
    async fn detect(&self, source_dir: &Path) -> Result<bool, Error> {
        Ok(fs::try_exists(source_dir.join("CMakeLists.txt")).await?)
    }

    async fn configure(&self, ctx: &BuildSystemContext, args: &[String]) -> Result<(), Error> {
        self.locate()?;
        fs::create_dir_all(&ctx.build_dir)
            .await
            .map_err(|e| Error::io_with_path(&e, &ctx.build_dir))?;

        let result = self.run(ctx, &Self::configure_args(ctx, args)).await?;
        if !result.success {
            return Err(BuildError::ConfigureFailed {
                message: result.stderr,
            }
            .into());
        }
        Ok(())
    }

    async fn build(&self, ctx: &BuildSystemContext, args: &[String]) -> Result<(), Error> {
        let result = self.run(ctx, &Self::build_args(ctx, args)).await?;
        if !result.success {
            return Err(BuildError::CompileFailed {
                message: result.stderr,
            }
            .into());
        }
        Ok(())
    }

    async fn install(&self, ctx: &BuildSystemContext) -> Result<(), Error> {
        fs::create_dir_all(&ctx.package_dir)
            .await
            .map_err(|e| Error::io_with_path(&e, &ctx.package_dir))?;

        let result = self.run(ctx, &Self::install_args(ctx)).await?;
        if !result.success {
            return Err(BuildError::InstallFailed {
                message: result.stderr,
            }
            .into());
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "cmake"
    }
}
