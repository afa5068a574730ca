//! Rendering of outdated-package reports.

use std::fmt;

use anyhow::Result;

use crate::version::OutdatedPackage;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tab-indented block per package
    #[default]
    Text,
    /// JSON array of reports
    Json,
}

/// ```text
/// numpy:
///     Installed:  1.26.4
///     Newest:     2.1.0
///     Newer:      2.0.0, 2.1.0
/// ```
impl fmt::Display for OutdatedPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.package)?;
        writeln!(f, "\tInstalled:\t{}", self.installed)?;
        writeln!(f, "\tNewest:\t\t{}", self.newest)?;
        writeln!(f, "\tNewer:\t\t{}", self.newer.join(", "))
    }
}

/// Render reports in `format`. Text output is empty when nothing is outdated.
pub fn render(reports: &[OutdatedPackage], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(reports)),
        OutputFormat::Json => render_json(reports),
    }
}

pub fn render_text(reports: &[OutdatedPackage]) -> String {
    reports.iter().map(|report| report.to_string()).collect()
}

pub fn render_json(reports: &[OutdatedPackage]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(reports)?;
    json.push('\n');
    Ok(json)
}
