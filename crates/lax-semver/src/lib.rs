//! Permissive version parsing, ordering and requirement matching
//!
//! This crate normalizes loosely structured version strings such as `1.0`,
//! `5.3-alpha.1`, `2.1.12-beta1021` or `4.4_build_4.4.000` into a totally
//! ordered representation, compares them, and matches them against
//! requirement strings like `>=1.2,<2.0` or `^1.4.0`. Versions can carry an
//! optional release date that, when present on both sides of a comparison,
//! overrides every other ordering key.

mod requirement;
mod semver;
mod spec;
mod version;
mod weights;

pub use requirement::{Operator, RequirementItem};
pub use semver::Semver;
pub use spec::{check_version_in_criteria, Spec};
pub use version::{ParseError, Version};
pub use weights::PreReleaseWeights;
