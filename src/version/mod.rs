//! Version catalog and comparator.
//!
//! Parses tabular package listings into [`VersionListing`]s, orders version
//! strings with a tolerant [`VersionKey`], and computes which installed
//! packages have strictly newer versions available.
//!
//! # Structure
//!
//! - `key` - Ordering key derived from a version string
//! - `listing` - Listing parser (package -> set of versions)
//! - `outdated` - Outdated-set computation
//! - `error` - Parse errors

mod error;
mod key;
mod listing;
mod outdated;

pub use error::ParseError;
pub use key::{KeyUnit, VersionKey, compare_versions, tokenize};
pub use listing::VersionListing;
pub use outdated::{OutdatedPackage, check_package, find_outdated};
