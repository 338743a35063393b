//! Danger classification
//!
//! Two explicit rules, checked in order:
//! 1. exact membership of the lower-cased label in the configured set
//! 2. a named fallback: the lower-cased label contains "knife", covering
//!    model-specific label variants ("kitchen knife", "knife_blade") that the
//!    set does not enumerate

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Substring fallback rule. Only "knife" is special-cased; additional named
/// fallbacks belong here, not inline in the match logic.
const FALLBACK_SUBSTRINGS: &[&str] = &["knife"];

/// Fixed set of labels considered inherently dangerous
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DangerSet {
    labels: HashSet<String>,
}

impl Default for DangerSet {
    fn default() -> Self {
        Self::new(["knife", "scissors", "sharp object", "blade", "weapon"])
    }
}

impl DangerSet {
    /// Build a set from configured labels. Entries are lower-cased so
    /// mixed-case configuration behaves like the defaults.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            labels: labels
                .into_iter()
                .map(|l| l.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Classify a label. Total over all inputs, no failure modes.
    pub fn is_dangerous(&self, label: &str) -> bool {
        let label = label.to_lowercase();

        if self.labels.contains(&label) {
            return true;
        }

        FALLBACK_SUBSTRINGS.iter().any(|sub| label.contains(sub))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn exact_membership() {
        let set = DangerSet::default();
        assert!(set.is_dangerous("knife"));
        assert!(set.is_dangerous("scissors"));
        assert!(set.is_dangerous("weapon"));
        assert!(!set.is_dangerous("person"));
        assert!(!set.is_dangerous("cup"));
    }

    #[test]
    fn membership_is_case_insensitive() {
        let set = DangerSet::default();
        assert!(set.is_dangerous("Knife"));
        assert!(set.is_dangerous("SCISSORS"));
    }

    #[test]
    fn knife_substring_fallback() {
        let set = DangerSet::new(["weapon"]);
        assert!(set.is_dangerous("kitchen knife"));
        assert!(set.is_dangerous("Knife_blade"));
        // The fallback covers only "knife"; other set entries get no
        // substring treatment
        assert!(!set.is_dangerous("toy weapon replica"));
    }

    #[test]
    fn configured_entries_are_normalized() {
        let set = DangerSet::new(["Machete"]);
        assert!(set.is_dangerous("machete"));
        assert!(set.is_dangerous("MACHETE"));
    }

    proptest! {
        // is_dangerous(L) iff lower(L) in set or "knife" substring of lower(L)
        #[test]
        fn classification_matches_definition(label in ".{0,40}") {
            let set = DangerSet::default();
            let lower = label.to_lowercase();
            let expected = ["knife", "scissors", "sharp object", "blade", "weapon"]
                .contains(&lower.as_str())
                || lower.contains("knife");
            prop_assert_eq!(set.is_dangerous(&label), expected);
        }
    }
}
