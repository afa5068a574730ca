//! The `conda` command-line tool as a source of package listings.

use std::io;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use log::{debug, info};
use thiserror::Error;

use crate::runtime::Runtime;

/// Executable used when neither `--conda` nor `CONDA_EXE` is given.
pub const DEFAULT_CONDA: &str = "conda";

const LIST_ARGS: &[&str] = &["list"];
const SEARCH_OUTDATED_ARGS: &[&str] = &["search", "--outdated"];

#[derive(Debug, Error)]
pub enum ToolInvocationError {
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed ({status}): {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("`{command}` printed output that is not valid UTF-8")]
    InvalidUtf8 {
        command: String,
        #[source]
        source: FromUtf8Error,
    },
}

/// Source of the two listings the outdated check needs.
#[cfg_attr(test, mockall::automock)]
pub trait PackageSource {
    /// Listing of installed packages.
    fn installed_listing(&self) -> Result<String, ToolInvocationError>;

    /// Listing of packages with newer versions available.
    fn available_listing(&self) -> Result<String, ToolInvocationError>;
}

/// Runs `conda` through a [`Runtime`]. One blocking call per listing, no retries.
pub struct CondaCli<'a, R: Runtime> {
    runtime: &'a R,
    executable: PathBuf,
}

impl<'a, R: Runtime> CondaCli<'a, R> {
    pub fn new(runtime: &'a R, executable: impl Into<PathBuf>) -> Self {
        Self {
            runtime,
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// `conda list`
    pub fn list_installed(&self) -> Result<String, ToolInvocationError> {
        self.run(LIST_ARGS)
    }

    /// `conda search --outdated`
    pub fn search_outdated(&self) -> Result<String, ToolInvocationError> {
        self.run(SEARCH_OUTDATED_ARGS)
    }

    #[tracing::instrument(skip(self))]
    fn run(&self, args: &[&str]) -> Result<String, ToolInvocationError> {
        let command = self.display_command(args);
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();

        info!("Running `{}`", command);
        let output = self
            .runtime
            .run_command(&self.executable, &args)
            .map_err(|source| ToolInvocationError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.success() {
            let status = match output.code {
                Some(code) => format!("exit code {}", code),
                None => "terminated by signal".to_string(),
            };
            return Err(ToolInvocationError::Failed {
                command,
                status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|source| ToolInvocationError::InvalidUtf8 {
                command: command.clone(),
                source,
            })?;

        debug!("`{}` printed {} line(s)", command, stdout.lines().count());
        Ok(stdout)
    }

    fn display_command(&self, args: &[&str]) -> String {
        let mut command = self.executable.display().to_string();
        for arg in args {
            command.push(' ');
            command.push_str(arg);
        }
        command
    }
}

impl<R: Runtime> PackageSource for CondaCli<'_, R> {
    fn installed_listing(&self) -> Result<String, ToolInvocationError> {
        self.list_installed()
    }

    fn available_listing(&self) -> Result<String, ToolInvocationError> {
        self.search_outdated()
    }
}
