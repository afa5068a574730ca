use anyhow::Result;
use clap::Parser;
use conda_outdated::commands::outdated;
use std::path::PathBuf;

/// conda-outdated - list outdated conda packages
///
/// Compares `conda list` against `conda search --outdated` and prints every
/// installed package that has a newer version available, together with all
/// versions newer than the installed one.
///
/// The conda executable is taken from --conda, then from the CONDA_EXE
/// environment variable, then from PATH.
#[derive(Parser, Debug)]
#[command(author, version = env!("CONDA_OUTDATED_VERSION"), about)]
struct Cli {
    /// Path to the conda executable
    #[arg(long = "conda", value_name = "PATH")]
    conda_exe: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = conda_outdated::runtime::RealRuntime;

    outdated(runtime, cli.conda_exe, cli.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_no_arguments() {
        let cli = Cli::try_parse_from(["conda-outdated"]).unwrap();
        assert_eq!(cli.conda_exe, None);
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_conda_path_parsing() {
        let cli =
            Cli::try_parse_from(["conda-outdated", "--conda", "/opt/conda/bin/conda"]).unwrap();
        assert_eq!(cli.conda_exe, Some(PathBuf::from("/opt/conda/bin/conda")));
    }

    #[test]
    fn test_cli_json_parsing() {
        let cli = Cli::try_parse_from(["conda-outdated", "--json"]).unwrap();
        assert!(cli.json);
    }

    #[test]
    fn test_cli_positional_argument_fails() {
        let result = Cli::try_parse_from(["conda-outdated", "numpy"]);
        assert!(result.is_err());
    }
}
