use log::debug;
use std::path::PathBuf;

use crate::{conda::DEFAULT_CONDA, report::OutputFormat, runtime::Runtime};

/// Environment variable conda's shell hook sets to its own executable.
pub const CONDA_EXE_ENV: &str = "CONDA_EXE";

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The conda executable to invoke
    pub conda_exe: PathBuf,
    /// How reports are printed
    pub format: OutputFormat,
}

impl Config {
    /// Resolve the executable from `--conda`, then `CONDA_EXE`, then `conda` on `PATH`.
    pub fn new<R: Runtime>(runtime: &R, conda_exe: Option<PathBuf>, json: bool) -> Self {
        let conda_exe = conda_exe
            .or_else(|| {
                runtime
                    .env_var(CONDA_EXE_ENV)
                    .ok()
                    .filter(|value| !value.trim().is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONDA));

        debug!("Using conda executable {:?}", conda_exe);

        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        Self { conda_exe, format }
    }
}
