//! Semver facade providing high-level version operations

use std::cmp::Ordering;

use crate::spec::Spec;
use crate::version::{ParseError, Version};

/// Main facade for version comparison and requirement matching
pub struct Semver;

impl Semver {
    /// Compare two raw version strings.
    ///
    /// `Less`, `Equal` and `Greater` correspond to -1, 0 and 1.
    pub fn compare(a: &str, b: &str) -> Result<Ordering, ParseError> {
        Ok(Version::parse(a)?.compare(&Version::parse(b)?))
    }

    /// Check whether a raw version satisfies a requirement string.
    pub fn matches(spec: &str, version: &str) -> Result<bool, ParseError> {
        Ok(Spec::parse(spec)?.matches(&Version::parse(version)?))
    }

    /// Check whether a version string is well formed.
    pub fn validate(version: &str) -> bool {
        Version::parse(version).is_ok()
    }

    /// Parse and sort version strings in ascending order.
    pub fn sort(versions: &[&str]) -> Result<Vec<Version>, ParseError> {
        Self::usort(versions, true)
    }

    /// Parse and sort version strings in descending order.
    pub fn rsort(versions: &[&str]) -> Result<Vec<Version>, ParseError> {
        Self::usort(versions, false)
    }

    fn usort(versions: &[&str], ascending: bool) -> Result<Vec<Version>, ParseError> {
        let mut parsed = versions
            .iter()
            .map(|raw| Version::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;

        parsed.sort_by(|a, b| {
            let ordering = a.compare(b);
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });

        Ok(parsed)
    }
}
