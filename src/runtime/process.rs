//! External process operations.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use super::RealRuntime;

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn run_command_impl(
        &self,
        program: &Path,
        args: &[String],
    ) -> io::Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        debug!(
            "{:?} exited with {:?} ({} bytes stdout, {} bytes stderr)",
            program,
            output.status.code(),
            output.stdout.len(),
            output.stderr.len()
        );

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
