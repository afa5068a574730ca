//! Outdated-set computation.
//!
//! Pure functions over two [`VersionListing`]s: what is installed and what is
//! available. A package is outdated when its oldest installed version has a
//! strictly smaller [`VersionKey`] than the best available version.

use std::collections::BTreeSet;

use log::{debug, trace};
use serde::Serialize;

use super::key::VersionKey;
use super::listing::VersionListing;

/// An installed package with strictly newer versions available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutdatedPackage {
    /// Package name
    pub package: String,
    /// Oldest installed version
    pub installed: String,
    /// Best available version
    pub newest: String,
    /// Every available version newer than `installed`, ascending
    pub newer: Vec<String>,
}

/// Check every installed package against the available listing.
///
/// Reports come back in installed-listing order. Packages without any
/// available versions are skipped.
pub fn find_outdated(
    installed: &VersionListing,
    available: &VersionListing,
) -> Vec<OutdatedPackage> {
    let outdated: Vec<_> = installed
        .iter()
        .filter_map(|(package, versions)| {
            check_package(package, versions, available.versions(package))
        })
        .collect();

    debug!(
        "{} of {} installed package(s) are outdated",
        outdated.len(),
        installed.len()
    );

    outdated
}

/// Decide whether a single package is outdated.
///
/// `current` is the minimum installed version by key and `newest` the
/// maximum available one. The package is reported only when the two differ
/// as strings *and* `key(current) < key(newest)`; versions that differ in
/// text but not in key are not upgrades.
pub fn check_package(
    package: &str,
    installed: &BTreeSet<String>,
    available: Option<&BTreeSet<String>>,
) -> Option<OutdatedPackage> {
    let available = available.filter(|versions| !versions.is_empty())?;

    // Ties keep ascending string order.
    let mut candidates: Vec<(VersionKey, &str)> = available
        .iter()
        .map(|v| (VersionKey::new(v), v.as_str()))
        .collect();
    candidates.sort_by(|a, b| a.0.cmp(&b.0));

    let (current_key, current) = installed
        .iter()
        .map(|v| (VersionKey::new(v), v.as_str()))
        .min_by(|a, b| a.0.cmp(&b.0))?;

    let (newest_key, newest) = candidates.last()?;

    if current == *newest || current_key >= *newest_key {
        trace!("{} {} is up to date (newest {})", package, current, newest);
        return None;
    }

    let newer = candidates
        .iter()
        .filter(|(key, _)| *key > current_key)
        .map(|(_, version)| version.to_string())
        .collect();

    Some(OutdatedPackage {
        package: package.to_string(),
        installed: current.to_string(),
        newest: newest.to_string(),
        newer,
    })
}
