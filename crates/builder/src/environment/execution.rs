//! Command execution

use super::{BuildCommandResult, BuildEnvironment};
use irrpkg_errors::{BuildError, Error};
use irrpkg_events::{AppEvent, BuildEvent, EventEmitter};
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;

impl BuildEnvironment {
    /// Execute a command and capture its output
    ///
    /// A non-zero exit status is reported through `success`; deciding which
    /// error it maps to is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::ToolNotFound` if the program cannot be spawned.
    pub async fn execute_command(
        &self,
        program: &str,
        args: &[&str],
        working_dir: Option<&Path>,
    ) -> Result<BuildCommandResult, Error> {
        let command_line = format!("{program} {}", args.join(" "));
        let working_dir = working_dir.map_or_else(
            || std::env::current_dir().unwrap_or_default(),
            Path::to_path_buf,
        );

        self.emit(AppEvent::Build(BuildEvent::CommandStarted {
            package: self.package.clone(),
            command: command_line.clone(),
            working_dir: working_dir.clone(),
        }));

        let started = Instant::now();
        let output = Command::new(program)
            .args(args)
            .current_dir(&working_dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => Error::from(BuildError::ToolNotFound {
                    program: program.to_string(),
                }),
                _ => Error::io_with_path(&e, &working_dir),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        for line in stdout.lines() {
            self.emit(AppEvent::Build(BuildEvent::OutputLine {
                package: self.package.clone(),
                line: line.to_string(),
                stderr: false,
            }));
        }
        for line in stderr.lines() {
            self.emit(AppEvent::Build(BuildEvent::OutputLine {
                package: self.package.clone(),
                line: line.to_string(),
                stderr: true,
            }));
        }

        let result = BuildCommandResult {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout,
            stderr,
        };

        if result.success {
            self.emit(AppEvent::Build(BuildEvent::CommandCompleted {
                package: self.package.clone(),
                command: command_line,
                duration: started.elapsed(),
            }));
        } else {
            self.emit(AppEvent::Build(BuildEvent::CommandFailed {
                package: self.package.clone(),
                command: command_line,
                exit_code: result.exit_code,
            }));
        }

        Ok(result)
    }
}
