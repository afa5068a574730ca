//! Parser for tabular package listings.
//!
//! The expected shape is the text printed by `conda list` and
//! `conda search --outdated`: two header lines, then one line per package
//! build starting with `<package> <version>` and any number of further
//! whitespace-separated columns.

use std::collections::BTreeSet;
use std::str::FromStr;

use indexmap::IndexMap;
use log::trace;

use super::error::ParseError;

/// Number of leading header lines discarded by [`VersionListing::parse`].
pub const HEADER_LINES: usize = 2;

/// Package name -> every version seen for it in one listing.
///
/// Packages keep the order of their first appearance; versions are kept in
/// ascending string order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionListing {
    packages: IndexMap<String, BTreeSet<String>>,
}

impl VersionListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse listing text. Blank lines are skipped; any other line that does
    /// not start with two whitespace-separated tokens fails the whole parse.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut listing = Self::new();

        for (idx, line) in text.lines().enumerate().skip(HEADER_LINES) {
            if line.trim().is_empty() {
                continue;
            }

            let (package, version) =
                split_package_line(line).ok_or_else(|| ParseError::MalformedLine {
                    line_number: idx + 1,
                    line: line.to_string(),
                })?;

            trace!("Listing line {}: {} {}", idx + 1, package, version);
            listing.insert(package, version);
        }

        Ok(listing)
    }

    /// Record `version` for `package`. Duplicate versions collapse.
    pub fn insert(&mut self, package: impl Into<String>, version: impl Into<String>) {
        self.packages
            .entry(package.into())
            .or_default()
            .insert(version.into());
    }

    pub fn versions(&self, package: &str) -> Option<&BTreeSet<String>> {
        self.packages.get(package)
    }

    pub fn contains(&self, package: &str) -> bool {
        self.packages.contains_key(package)
    }

    /// Iterate packages in listing order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.packages.iter().map(|(name, versions)| (name.as_str(), versions))
    }

    /// Number of distinct packages.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl FromStr for VersionListing {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<P: Into<String>, V: Into<String>> FromIterator<(P, V)> for VersionListing {
    fn from_iter<I: IntoIterator<Item = (P, V)>>(iter: I) -> Self {
        let mut listing = Self::new();
        for (package, version) in iter {
            listing.insert(package, version);
        }
        listing
    }
}

/// Match `^(\S+)\s+(\S+)`: the line must not start with whitespace.
fn split_package_line(line: &str) -> Option<(&str, &str)> {
    if line.starts_with(char::is_whitespace) {
        return None;
    }

    let mut fields = line.split_whitespace();
    let package = fields.next()?;
    let version = fields.next()?;
    Some((package, version))
}
