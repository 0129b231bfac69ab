//! Local decision evaluation
//!
//! Predicts what the external transfer tool will do with a path under a
//! compiled rule sequence. The policy is last-match-wins over a full,
//! in-order scan: an earlier broad exclude can be un-done by a later narrow
//! include, and vice versa.

use crate::matcher;
use crate::rule::{Rule, Sign};
use serde::Serialize;

/// The outcome of evaluating one relative path against an ordered rule
/// sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// The last matching rule was an include
    Include,
    /// The last matching rule was an exclude
    Exclude,
    /// No rule matched
    Neutral,
}

impl Decision {
    /// Stable lowercase name, as used in parity diagnostics
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Exclude => "exclude",
            Self::Neutral => "neutral",
        }
    }
}

/// Evaluate `rel_path` against `rules`
///
/// Scans every rule in order and keeps the sign of the last one that
/// matches; the scan never stops early. Deterministic: the same
/// `(path, rules)` pair always yields the same decision.
pub fn decide(rel_path: &str, rules: &[Rule]) -> Decision {
    let mut decision = Decision::Neutral;
    for rule in rules {
        if matcher::matches(rule.glob(), rel_path) {
            decision = match rule.sign() {
                Sign::Include => Decision::Include,
                Sign::Exclude => Decision::Exclude,
            };
        }
    }
    decision
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use crate::rule::parse_rule_lines;

    #[test]
    fn test_no_rules_is_neutral() {
        assert_eq!(decide("a/b.txt", &[]), Decision::Neutral);
    }

    #[test]
    fn test_later_include_overrides_earlier_exclude() {
        let rules = parse_rule_lines(["- *.log", "+ important.log"]);
        assert_eq!(decide("a/important.log", &rules), Decision::Include);
        assert_eq!(decide("other.log", &rules), Decision::Exclude);
    }

    #[test]
    fn test_later_exclude_overrides_earlier_include() {
        let rules = parse_rule_lines(["+ *.log", "- important.log"]);
        assert_eq!(decide("a/important.log", &rules), Decision::Exclude);
        assert_eq!(decide("b/other.log", &rules), Decision::Include);
    }

    #[test]
    fn test_unmatched_path_stays_neutral() {
        let rules = parse_rule_lines(["- *.log"]);
        assert_eq!(decide("notes.txt", &rules), Decision::Neutral);
    }

    #[test]
    fn test_decision_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Decision::Exclude).unwrap(),
            "\"exclude\""
        );
        assert_eq!(Decision::Neutral.as_str(), "neutral");
    }
}
