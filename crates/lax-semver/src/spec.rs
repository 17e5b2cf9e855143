//! Conjunctive requirement specifications and candidate selection

use std::fmt;

use crate::requirement::RequirementItem;
use crate::version::{ParseError, Version};

/// A conjunction of requirement items parsed from a comma-separated string,
/// e.g. `>=1.2,<2.0`.
///
/// Item order is irrelevant to matching and preserved only for display; two
/// specs are equal when their item sets are equal regardless of order or
/// duplication.
#[derive(Debug, Clone)]
pub struct Spec {
    items: Vec<RequirementItem>,
}

impl Spec {
    /// Parse a comma-separated requirement string.
    pub fn parse(spec_string: &str) -> Result<Self, ParseError> {
        let items = spec_string
            .split(',')
            .map(RequirementItem::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Spec { items })
    }

    /// A spec with no items, which matches every version.
    pub fn empty() -> Self {
        Spec { items: Vec::new() }
    }

    /// Check whether a version satisfies every item.
    pub fn matches(&self, version: &Version) -> bool {
        self.items.iter().all(|item| item.matches(version))
    }

    /// Lazily yield the matching versions in input order. The input is not
    /// consumed, so the filter can be re-run over the same slice.
    pub fn filter<'a>(
        &'a self,
        versions: &'a [Version],
    ) -> impl Iterator<Item = &'a Version> + 'a {
        versions.iter().filter(move |version| self.matches(version))
    }

    /// The best (maximum) matching version, or `None` when nothing matches.
    pub fn select<'a>(&'a self, versions: &'a [Version]) -> Option<&'a Version> {
        self.filter(versions).max()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RequirementItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl PartialEq for Spec {
    fn eq(&self, other: &Self) -> bool {
        self.items.iter().all(|item| other.items.contains(item))
            && other.items.iter().all(|item| self.items.contains(item))
    }
}

impl fmt::Display for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.items.iter().map(|item| item.to_string()).collect();
        write!(f, "{}", items.join(","))
    }
}

/// Check a version against a set of alternative specs (logical OR), with a
/// narrowing rule: whenever a spec of exactly two items has an operand
/// sharing `major.minor` with the version, the running result is replaced by
/// that spec's own verdict. A more specific two-item spec for the version's
/// release line thus silences coincidental matches from unrelated specs.
pub fn check_version_in_criteria(specs: &[Spec], version: &Version) -> bool {
    let mut result = false;

    for spec in specs {
        result = result || spec.matches(version);

        if spec.len() == 2 {
            for item in spec.iter() {
                if let Some(operand) = item.operand() {
                    if operand.major() == version.major() && operand.minor() == version.minor() {
                        result = spec.matches(version);
                        break;
                    }
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(raw: &str) -> Version {
        Version::parse(raw).unwrap()
    }

    fn versions(raws: &[&str]) -> Vec<Version> {
        raws.iter().map(|raw| version(raw)).collect()
    }

    #[test]
    fn test_conjunction() {
        let spec = Spec::parse(">=1.0,<2.0").unwrap();
        assert!(spec.matches(&version("1.5")));
        assert!(spec.matches(&version("1.0")));
        assert!(!spec.matches(&version("2.0")));
        assert!(!spec.matches(&version("0.9")));
    }

    #[test]
    fn test_empty_spec_matches_everything() {
        let spec = Spec::empty();
        assert!(spec.matches(&version("0.0.1")));
        assert!(spec.matches(&version("99.9")));
    }

    #[test]
    fn test_parse_propagates_item_errors() {
        assert!(matches!(
            Spec::parse(">=1.0,"),
            Err(ParseError::MalformedRequirement(_))
        ));
        assert!(Spec::parse("").is_err());
        assert!(Spec::parse(">=1.0,bogus").is_err());
    }

    #[test]
    fn test_set_equality() {
        let a = Spec::parse(">=1.0,<2.0").unwrap();
        let b = Spec::parse("<2.0,>=1.0").unwrap();
        let with_duplicate = Spec::parse(">=1.0,<2.0,>=1.0").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, with_duplicate);
        assert_ne!(a, Spec::parse(">=1.0,<3.0").unwrap());
    }

    #[test]
    fn test_filter_preserves_order_and_is_restartable() {
        let spec = Spec::parse(">=1.0,<2.0").unwrap();
        let candidates = versions(&["0.9", "1.1", "2.0", "1.9.9"]);

        let matched: Vec<&str> = spec.filter(&candidates).map(Version::raw).collect();
        assert_eq!(matched, vec!["1.1", "1.9.9"]);

        // A second pass over the same slice sees the same versions
        assert_eq!(spec.filter(&candidates).count(), 2);
    }

    #[test]
    fn test_select_returns_best_match() {
        let spec = Spec::parse("^1.4.0").unwrap();
        let candidates = versions(&["1.3.0", "1.4.2", "1.9.0", "2.0.0", "1.5.5"]);
        assert_eq!(spec.select(&candidates), Some(&version("1.9.0")));

        let none = Spec::parse(">=3.0").unwrap();
        assert_eq!(none.select(&candidates), None);
    }

    #[test]
    fn test_display_joins_items() {
        let spec = Spec::parse(">=1.0,<2.0").unwrap();
        assert_eq!(spec.to_string(), ">=1.0,<2.0");
    }

    #[test]
    fn test_criteria_plain_or() {
        let specs = vec![
            Spec::parse(">=1.0,<2.0").unwrap(),
            Spec::parse(">=3.0,<4.0").unwrap(),
        ];
        assert!(check_version_in_criteria(&specs, &version("3.5")));
        assert!(!check_version_in_criteria(&specs, &version("2.5")));
    }

    #[test]
    fn test_criteria_two_item_spec_overrides_earlier_match() {
        // The broad spec matches 1.5.2, but the two-item spec pinned to the
        // 1.5 line does not, and its verdict wins.
        let specs = vec![
            Spec::parse(">=1.0").unwrap(),
            Spec::parse(">=1.5.3,<1.6.0").unwrap(),
        ];
        assert!(!check_version_in_criteria(&specs, &version("1.5.2")));
        assert!(check_version_in_criteria(&specs, &version("1.5.4")));
        // Versions outside the pinned line keep the broad verdict
        assert!(check_version_in_criteria(&specs, &version("1.7")));
    }

    #[test]
    fn test_criteria_override_is_not_sticky() {
        // A later spec still ORs back in after an earlier override.
        let specs = vec![
            Spec::parse(">=1.5.3,<1.6.0").unwrap(),
            Spec::parse(">=1.0").unwrap(),
        ];
        assert!(check_version_in_criteria(&specs, &version("1.5.2")));
    }

    #[test]
    fn test_criteria_single_item_specs_never_override() {
        let specs = vec![
            Spec::parse(">=1.0").unwrap(),
            Spec::parse("==1.5.3").unwrap(),
        ];
        assert!(check_version_in_criteria(&specs, &version("1.5.2")));
    }
}
