//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over the few system
//! operations the checker needs, enabling dependency injection and
//! testability.
//!
//! # Structure
//!
//! - `env` - Environment variables
//! - `process` - Running external programs and capturing their output

mod env;
mod process;

use std::env as std_env;
use std::io;
use std::path::Path;

pub use process::CommandOutput;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;

    // Processes
    /// Run `program` with `args` to completion, capturing stdout and stderr.
    /// Stdin is closed. Errors only if the program could not be started.
    fn run_command(&self, program: &Path, args: &[String]) -> io::Result<CommandOutput>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn run_command(&self, program: &Path, args: &[String]) -> io::Result<CommandOutput> {
        self.run_command_impl(program, args)
    }
}
