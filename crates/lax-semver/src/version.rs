//! Version parsing and ordering

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::weights::{PreReleaseWeights, PLAIN_RELEASE_WEIGHT};

/// Error type for version and requirement parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty version string")]
    EmptyInput,
    #[error("invalid major version in \"{0}\"")]
    MalformedMajor(String),
    #[error("invalid minor version in \"{0}\"")]
    MalformedMinor(String),
    #[error("invalid patch version in \"{0}\"")]
    MalformedPatch(String),
    #[error("invalid release date \"{date}\" for version \"{version}\", expected YYYY/MM/DD")]
    MalformedReleaseDate { version: String, date: String },
    #[error("no pre-release keyword matches \"{0}\"")]
    UnknownPreRelease(String),
    #[error("invalid requirement specification \"{0}\"")]
    MalformedRequirement(String),
}

lazy_static! {
    static ref NUMERIC_RE: Regex = Regex::new(r"^\d+$").unwrap();

    // Numeric prefix followed by the first `-` or `_` separator; the
    // remainder is the pre-release suffix.
    static ref SUFFIX_SPLIT_RE: Regex = Regex::new(r"^(\d+)[-_](.*)$").unwrap();

    static ref DEFAULT_WEIGHTS: PreReleaseWeights = PreReleaseWeights::default();
}

const RELEASE_DATE_FORMAT: &str = "%Y/%m/%d";

/// Normalized representation of a permissive version string.
///
/// A version is parsed once and never mutated. Ordering compares
/// `(major, minor, patch)` first, then the pre-release weight, then the
/// pre-release text. When both sides carry a release date, the dates alone
/// decide the comparison, so two structurally different versions with the
/// same date compare equal.
#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: Option<u64>,
    pre_release: String,
    pre_release_weight: u32,
    release_date: Option<NaiveDate>,
    raw: String,
}

impl Version {
    /// Parse a version string using the default pre-release weight table.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        Self::parse_with_weights(raw, None, &DEFAULT_WEIGHTS)
    }

    /// Parse a version string together with its `YYYY/MM/DD` release date.
    pub fn parse_dated(raw: &str, release_date: &str) -> Result<Self, ParseError> {
        Self::parse_with_weights(raw, Some(release_date), &DEFAULT_WEIGHTS)
    }

    /// Parse with a caller-supplied weight table.
    pub fn parse_with_weights(
        raw: &str,
        release_date: Option<&str>,
        weights: &PreReleaseWeights,
    ) -> Result<Self, ParseError> {
        if raw.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let segments: Vec<&str> = raw.split('.').collect();
        if segments.len() == 1 {
            // A bare token has no minor segment, even if fully numeric.
            return Err(ParseError::MalformedMinor(raw.to_string()));
        }

        if !NUMERIC_RE.is_match(segments[0]) {
            return Err(ParseError::MalformedMajor(raw.to_string()));
        }
        let major: u64 = segments[0]
            .parse()
            .map_err(|_| ParseError::MalformedMajor(raw.to_string()))?;

        let minor: u64;
        let mut patch: Option<u64> = None;
        let mut pre_release = String::new();

        if NUMERIC_RE.is_match(segments[1]) {
            minor = segments[1]
                .parse()
                .map_err(|_| ParseError::MalformedMinor(raw.to_string()))?;

            if segments.len() > 2 {
                if NUMERIC_RE.is_match(segments[2]) {
                    patch = Some(
                        segments[2]
                            .parse()
                            .map_err(|_| ParseError::MalformedPatch(raw.to_string()))?,
                    );
                    pre_release = segments[3..].join(".");
                } else {
                    let rejoined = segments[2..].join(".");
                    let caps = SUFFIX_SPLIT_RE
                        .captures(&rejoined)
                        .ok_or_else(|| ParseError::MalformedPatch(raw.to_string()))?;
                    patch = Some(
                        caps[1]
                            .parse()
                            .map_err(|_| ParseError::MalformedPatch(raw.to_string()))?,
                    );
                    pre_release = caps[2].to_string();
                }
            }
        } else {
            // Pre-release attached to the minor segment suppresses patch
            // lookup entirely; the patch stays absent.
            let rejoined = segments[1..].join(".");
            let caps = SUFFIX_SPLIT_RE
                .captures(&rejoined)
                .ok_or_else(|| ParseError::MalformedMinor(raw.to_string()))?;
            minor = caps[1]
                .parse()
                .map_err(|_| ParseError::MalformedMinor(raw.to_string()))?;
            pre_release = caps[2].to_string();
        }

        let pre_release_weight = weights
            .weight_of(&pre_release)
            .ok_or_else(|| ParseError::UnknownPreRelease(pre_release.clone()))?;

        let release_date = match release_date {
            Some(text) => Some(
                NaiveDate::parse_from_str(text, RELEASE_DATE_FORMAT).map_err(|_| {
                    ParseError::MalformedReleaseDate {
                        version: raw.to_string(),
                        date: text.to_string(),
                    }
                })?,
            ),
            None => None,
        };

        Ok(Version {
            major,
            minor,
            patch,
            pre_release,
            pre_release_weight,
            release_date,
            raw: raw.to_string(),
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    /// Explicit patch segment, or `None` when the input supplied none.
    ///
    /// The absent state orders like 0 but is distinguishable; the `~=`
    /// requirement operator widens its upper boundary when it is absent.
    pub fn patch(&self) -> Option<u64> {
        self.patch
    }

    /// Raw pre-release suffix, possibly empty.
    pub fn pre_release(&self) -> &str {
        &self.pre_release
    }

    pub fn pre_release_weight(&self) -> u32 {
        self.pre_release_weight
    }

    pub fn release_date(&self) -> Option<NaiveDate> {
        self.release_date
    }

    /// The original input string, verbatim.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Compare two versions.
    ///
    /// Precedence: release dates when both are present, then
    /// `(major, minor, patch)` with an absent patch ordering as 0, then the
    /// pre-release weight, then the pre-release text.
    pub fn compare(&self, other: &Version) -> Ordering {
        if let (Some(a), Some(b)) = (self.release_date, other.release_date) {
            return a.cmp(&b);
        }

        (self.major, self.minor, self.patch.unwrap_or(0))
            .cmp(&(other.major, other.minor, other.patch.unwrap_or(0)))
            .then_with(|| self.pre_release_weight.cmp(&other.pre_release_weight))
            .then_with(|| self.pre_release.cmp(&other.pre_release))
    }

    /// Smallest plain release strictly greater than every `major.*` version.
    pub fn next_major(&self) -> Version {
        Version::plain(self.major + 1, 0, 0)
    }

    /// Smallest plain release strictly greater than every
    /// `major.minor.*` version.
    pub fn next_minor(&self) -> Version {
        Version::plain(self.major, self.minor + 1, 0)
    }

    /// Smallest plain release strictly greater than every pre-release of
    /// `major.minor.patch`.
    pub fn next_patch(&self) -> Version {
        Version::plain(self.major, self.minor, self.patch.unwrap_or(0) + 1)
    }

    fn plain(major: u64, minor: u64, patch: u64) -> Version {
        Version {
            major,
            minor,
            patch: Some(patch),
            pre_release: String::new(),
            pre_release_weight: PLAIN_RELEASE_WEIGHT,
            release_date: None,
            raw: format!("{}.{}.{}", major, minor, patch),
        }
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.release_date {
            Some(date) => write!(f, "{}:{}", self.raw, date.format(RELEASE_DATE_FORMAT)),
            None => write!(f, "{}:N.A.", self.raw),
        }
    }
}
