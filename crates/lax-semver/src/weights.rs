//! Ordered pre-release keyword weight table

/// Weight assigned to a plain release (empty pre-release suffix).
pub(crate) const PLAIN_RELEASE_WEIGHT: u32 = 6;

// Probe order matters: `alpha` must come before `a` so a suffix like
// `alphabeta` resolves to the `alpha` entry. The empty keyword is a
// substring of every suffix, so any text that matched nothing earlier
// lands on the plain-release weight.
const DEFAULT_WEIGHTS: &[(&str, u32)] = &[
    ("alpha", 1),
    ("a", 1),
    ("beta", 2),
    ("b", 2),
    ("milestone", 3),
    ("m", 3),
    ("rc", 4),
    ("cr", 4),
    ("", PLAIN_RELEASE_WEIGHT),
    ("final", 7),
    ("ga", 8),
    ("sp", 9),
];

/// Ordered mapping from pre-release keyword to its ordering weight.
///
/// The table is probed front to back and the first keyword occurring as a
/// substring of the pre-release text wins, so entry order is part of the
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreReleaseWeights {
    entries: Vec<(String, u32)>,
}

impl PreReleaseWeights {
    /// Build a table from explicit `(keyword, weight)` pairs, probed in the
    /// given order.
    pub fn new(entries: Vec<(String, u32)>) -> Self {
        PreReleaseWeights { entries }
    }

    /// Weight of the first keyword occurring as a substring of `pre_release`.
    pub fn weight_of(&self, pre_release: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(keyword, _)| pre_release.contains(keyword.as_str()))
            .map(|(_, weight)| *weight)
    }

    /// The `(keyword, weight)` pairs in probe order.
    pub fn entries(&self) -> &[(String, u32)] {
        &self.entries
    }
}

impl Default for PreReleaseWeights {
    fn default() -> Self {
        PreReleaseWeights {
            entries: DEFAULT_WEIGHTS
                .iter()
                .map(|(keyword, weight)| (keyword.to_string(), *weight))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_release_weight() {
        let table = PreReleaseWeights::default();
        assert_eq!(table.weight_of(""), Some(6));
    }

    #[test]
    fn test_probe_order() {
        let table = PreReleaseWeights::default();
        assert_eq!(table.weight_of("alpha"), Some(1));
        // `alpha` is probed before `a`
        assert_eq!(table.weight_of("alphabeta"), Some(1));
        // `beta` contains the letter `a`, which probes earlier than `beta`
        assert_eq!(table.weight_of("beta"), Some(1));
        assert_eq!(table.weight_of("b2"), Some(2));
        assert_eq!(table.weight_of("rc1"), Some(4));
        assert_eq!(table.weight_of("cr"), Some(4));
    }

    #[test]
    fn test_unknown_text_falls_through_to_empty_keyword() {
        let table = PreReleaseWeights::default();
        assert_eq!(table.weight_of("sp"), Some(6));
        assert_eq!(table.weight_of("20161213"), Some(6));
    }

    #[test]
    fn test_custom_table() {
        let table = PreReleaseWeights::new(vec![("nightly".to_string(), 1)]);
        assert_eq!(table.weight_of("nightly2"), Some(1));
        assert_eq!(table.weight_of("stable"), None);
    }
}
