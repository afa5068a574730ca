use anyhow::{Context, Result};
use log::{debug, info};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::{
    conda::{CondaCli, PackageSource},
    report::{OutputFormat, render},
    runtime::Runtime,
    version::{VersionListing, find_outdated},
};

use super::config::Config;

/// Print installed packages that have newer versions available.
#[tracing::instrument(skip(runtime, conda_exe))]
pub fn outdated<R: Runtime>(runtime: R, conda_exe: Option<PathBuf>, json: bool) -> Result<()> {
    let config = Config::new(&runtime, conda_exe, json);
    let conda = CondaCli::new(&runtime, config.conda_exe);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&conda, config.format, &mut out)
}

/// Fetch both listings from `source`, then parse, compare and write the report to `out`.
#[tracing::instrument(skip(source, out))]
pub fn run<S: PackageSource, W: Write>(
    source: &S,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let installed_text = source
        .installed_listing()
        .context("Failed to list installed packages")?;
    let available_text = source
        .available_listing()
        .context("Failed to list available package versions")?;

    let installed = VersionListing::parse(&installed_text)
        .context("Failed to parse the installed package listing")?;
    let available = VersionListing::parse(&available_text)
        .context("Failed to parse the available package listing")?;

    debug!(
        "{} installed package(s), {} with newer versions listed",
        installed.len(),
        available.len()
    );

    let reports = find_outdated(&installed, &available);
    info!("Found {} outdated package(s)", reports.len());

    out.write_all(render(&reports, format)?.as_bytes())
        .context("Failed to write report")?;
    out.flush().context("Failed to write report")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conda::{MockPackageSource, ToolInvocationError};
    use crate::runtime::MockRuntime;
    use crate::test_utils::{LIST_HEADER, SEARCH_HEADER, configure_mock_conda, test_conda};
    use crate::version::ParseError;
    use mockall::predicate::eq;

    const INSTALLED: &str = concat!(
        "# Name                    Version\n",
        "# --\n",
        "foo                       1.2.0\n",
        "bar                       0.9.1\n",
    );
    const AVAILABLE: &str = concat!(
        "# Name                    Version\n",
        "# --\n",
        "foo                       1.3.0\n",
        "foo                       1.4.0\n",
    );

    fn mock_source(installed: &str, available: &str) -> MockPackageSource {
        let installed = installed.to_string();
        let available = available.to_string();
        let mut source = MockPackageSource::new();
        source
            .expect_installed_listing()
            .times(1)
            .returning(move || Ok(installed.clone()));
        source
            .expect_available_listing()
            .times(1)
            .returning(move || Ok(available.clone()));
        source
    }

    fn run_to_string(source: &MockPackageSource, format: OutputFormat) -> Result<String> {
        let mut out = Vec::new();
        run(source, format, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_run_end_to_end_scenario() {
        let source = mock_source(INSTALLED, AVAILABLE);

        let output = run_to_string(&source, OutputFormat::Text).unwrap();

        assert_eq!(
            output,
            "foo:\n\tInstalled:\t1.2.0\n\tNewest:\t\t1.4.0\n\tNewer:\t\t1.3.0, 1.4.0\n"
        );
    }

    #[test]
    fn test_run_json() {
        let source = mock_source(INSTALLED, AVAILABLE);

        let output = run_to_string(&source, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value[0]["package"], "foo");
        assert_eq!(value[0]["newer"], serde_json::json!(["1.3.0", "1.4.0"]));
        assert_eq!(value.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_run_nothing_outdated_prints_nothing() {
        let source = mock_source(INSTALLED, "h1\nh2\nfoo 1.2.0\n");

        let output = run_to_string(&source, OutputFormat::Text).unwrap();

        assert!(output.is_empty());
    }

    #[test]
    fn test_run_malformed_installed_listing() {
        let source = mock_source("h1\nh2\nfoo\n", AVAILABLE);

        let err = run_to_string(&source, OutputFormat::Text).unwrap_err();

        assert!(err.to_string().contains("installed package listing"));
        assert_eq!(
            err.downcast_ref::<ParseError>(),
            Some(&ParseError::MalformedLine {
                line_number: 3,
                line: "foo".into(),
            })
        );
    }

    #[test]
    fn test_run_malformed_available_listing() {
        let source = mock_source(INSTALLED, "h1\nh2\n\tfoo 1.0\n");

        let err = run_to_string(&source, OutputFormat::Text).unwrap_err();

        assert!(err.to_string().contains("available package listing"));
        assert!(err.downcast_ref::<ParseError>().is_some());
    }

    #[test]
    fn test_run_tool_failure_stops_before_second_listing() {
        let mut source = MockPackageSource::new();
        source.expect_installed_listing().times(1).returning(|| {
            Err(ToolInvocationError::Failed {
                command: "conda list".into(),
                status: "exit code 1".into(),
                stderr: "boom".into(),
            })
        });
        source.expect_available_listing().never();

        let err = run_to_string(&source, OutputFormat::Text).unwrap_err();

        assert!(err.to_string().contains("Failed to list installed packages"));
        assert!(err.downcast_ref::<ToolInvocationError>().is_some());
    }

    #[test]
    fn test_run_with_real_conda_listing_shapes() {
        // `conda list` prints a third header line; it parses as package `#`
        // and never matches anything available.
        let installed = format!(
            "{}{}{}{}",
            LIST_HEADER,
            "# Name                    Version                   Build  Channel\n",
            "numpy                     1.26.4          py311h64a7726_0    conda-forge\n",
            "python                    3.11.9          hb806964_0_cpython    conda-forge\n",
        );
        let available = format!(
            "{}{}{}",
            SEARCH_HEADER,
            "numpy                          2.0.0 py311h1461c94_0  conda-forge\n",
            "numpy                          2.1.3 py311h71ddf71_0  conda-forge\n",
        );
        let source = mock_source(&installed, &available);

        let output = run_to_string(&source, OutputFormat::Text).unwrap();

        assert_eq!(
            output,
            "numpy:\n\tInstalled:\t1.26.4\n\tNewest:\t\t2.1.3\n\tNewer:\t\t2.0.0, 2.1.3\n"
        );
    }

    #[test]
    fn test_outdated_uses_conda_exe_from_environment() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq("CONDA_EXE"))
            .returning(|_| Ok(test_conda().display().to_string()));
        configure_mock_conda(&mut runtime, INSTALLED, AVAILABLE);

        assert!(outdated(runtime, None, false).is_ok());
    }

    #[test]
    fn test_outdated_reports_tool_failure() {
        let mut runtime = MockRuntime::new();
        runtime.expect_run_command().times(1).returning(|_, _| {
            Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No such file or directory",
            ))
        });

        let err = outdated(runtime, Some(PathBuf::from("/missing/conda")), false).unwrap_err();

        assert!(err.downcast_ref::<ToolInvocationError>().is_some());
    }
}
