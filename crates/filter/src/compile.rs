//! Rule set compilation
//!
//! Translates ordered user patterns plus caller-supplied default excludes
//! into the ordered rule sequence handed to the transfer tool and the local
//! evaluator. Compilation is a pure function of its inputs: the same
//! pattern list always yields the same rules, in the same order.

use crate::decision::{self, Decision};
use crate::pattern::{Polarity, parse_all};
use crate::rule::{self, Rule};

/// Compilation mode for a [`RuleSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Include/exclude patterns evaluated as written
    #[default]
    Normal,
    /// Only the listed paths survive; everything else is excluded
    WhitelistOnly,
}

/// An ordered sequence of compiled rules plus the mode they were built in
///
/// Invariant: in whitelist mode the final rule is always the catch-all
/// `- *`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    mode: Mode,
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compile user patterns and default excludes into an ordered rule set
    ///
    /// In [`Mode::Normal`], a `!`-prefixed pattern becomes a root + ancestor
    /// + self + recursive include chain and every plain pattern becomes a
    /// verbatim exclude; include chains are emitted ahead of the excludes so
    /// a tool that prunes directory descent still reaches the forced paths.
    /// In [`Mode::WhitelistOnly`] the polarity of the inputs is ignored:
    /// every entry is something to keep, and the set ends with `- *`.
    ///
    /// Default excludes are appended in both modes. An entry that already
    /// starts with `+` or `-` is taken as a literal rule line instead of
    /// being re-prefixed.
    pub fn compile(mode: Mode, patterns: &[String], default_excludes: &[String]) -> Self {
        match mode {
            Mode::Normal => Self::compile_normal(patterns, default_excludes),
            Mode::WhitelistOnly => Self::compile_whitelist(patterns, default_excludes),
        }
    }

    fn compile_normal(patterns: &[String], default_excludes: &[String]) -> Self {
        let mut includes = Vec::new();
        let mut excludes = Vec::new();

        for pattern in parse_all(patterns) {
            match pattern.polarity() {
                Polarity::ForceInclude => {
                    push_include_chain(&mut includes, &pattern.anchored_stem());
                }
                Polarity::Exclude => excludes.push(Rule::exclude(pattern.body())),
            }
        }

        let mut rules = includes;
        rules.append(&mut excludes);
        push_defaults(&mut rules, default_excludes);

        Self {
            mode: Mode::Normal,
            rules,
        }
    }

    fn compile_whitelist(patterns: &[String], default_excludes: &[String]) -> Self {
        let mut rules = Vec::new();

        // Polarity is irrelevant here: every listed entry is a keep, and a
        // stray `!` prefix is simply dropped by the stem normalization.
        for pattern in parse_all(patterns) {
            push_include_chain(&mut rules, &pattern.anchored_stem());
        }

        push_defaults(&mut rules, default_excludes);
        rules.push(Rule::exclude("*"));

        Self {
            mode: Mode::WhitelistOnly,
            rules,
        }
    }

    /// The mode this set was compiled in
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The compiled rules, in evaluation order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Whether the set contains no rules at all
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rule-file line form of every rule, in order
    pub fn lines(&self) -> Vec<String> {
        self.rules.iter().map(Rule::as_line).collect()
    }

    /// Evaluate one relative path against this set
    pub fn decide(&self, rel_path: &str) -> Decision {
        decision::decide(rel_path, &self.rules)
    }
}

/// Emit the include chain for one forced path: the transfer root, every
/// ancestor segment, the path itself, and its recursive contents. Omitting
/// the ancestors makes a tool that prunes directory descent on first
/// exclude silently skip the target.
fn push_include_chain(rules: &mut Vec<Rule>, stem: &str) {
    let trimmed = stem.trim_matches('/');
    if trimmed.is_empty() {
        return;
    }

    rules.push(Rule::include("/"));
    let mut acc = String::new();
    for part in trimmed.split('/') {
        acc.push('/');
        acc.push_str(part);
        rules.push(Rule::include(acc.clone()));
    }
    rules.push(Rule::include(format!("{acc}/**")));
}

fn push_defaults(rules: &mut Vec<Rule>, default_excludes: &[String]) {
    for raw in default_excludes {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        if raw.starts_with('+') || raw.starts_with('-') {
            if let Some(literal) = rule::parse_rule_line(raw) {
                rules.push(literal);
            }
        } else {
            rules.push(Rule::exclude(raw));
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_plain_patterns_become_verbatim_excludes() {
        let set = RuleSet::compile(Mode::Normal, &strings(&["*.log", "/build"]), &[]);
        assert_eq!(set.lines(), vec!["- *.log", "- /build"]);
    }

    #[test]
    fn test_force_include_emits_ancestor_chain() {
        let set = RuleSet::compile(Mode::Normal, &strings(&["!a/b/c"]), &[]);
        assert_eq!(
            set.lines(),
            vec!["+ /", "+ /a", "+ /a/b", "+ /a/b/c", "+ /a/b/c/**"]
        );
    }

    #[test]
    fn test_includes_are_emitted_before_excludes() {
        let set = RuleSet::compile(Mode::Normal, &strings(&["*.log", "!keep/data"]), &[]);
        let lines = set.lines();
        assert_eq!(
            lines,
            vec!["+ /", "+ /keep", "+ /keep/data", "+ /keep/data/**", "- *.log"]
        );
    }

    #[test]
    fn test_default_excludes_are_appended() {
        let set = RuleSet::compile(
            Mode::Normal,
            &strings(&["*.log"]),
            &strings(&["- /.git/", ".*/"]),
        );
        assert_eq!(set.lines(), vec!["- *.log", "- /.git/", "- .*/"]);
    }

    #[test]
    fn test_whitelist_ends_with_catch_all() {
        let set = RuleSet::compile(
            Mode::WhitelistOnly,
            &strings(&["src", "README.md"]),
            &strings(&["- /.git/"]),
        );
        let lines = set.lines();
        assert_eq!(lines.last().unwrap(), "- *");
        assert!(lines.contains(&"+ /src".to_string()));
        assert!(lines.contains(&"+ /src/**".to_string()));
        assert!(lines.contains(&"+ /README.md".to_string()));
        assert!(lines.contains(&"+ /README.md/**".to_string()));
        assert_eq!(set.mode(), Mode::WhitelistOnly);
    }

    #[test]
    fn test_whitelist_ignores_polarity_and_blanks() {
        let set = RuleSet::compile(
            Mode::WhitelistOnly,
            &strings(&["!src/", "", "  ", "docs"]),
            &[],
        );
        let lines = set.lines();
        assert_eq!(
            lines,
            vec![
                "+ /",
                "+ /src",
                "+ /src/**",
                "+ /",
                "+ /docs",
                "+ /docs/**",
                "- *"
            ]
        );
    }

    #[test]
    fn test_compilation_is_idempotent() {
        let patterns = strings(&["*.log", "!keep/data", "cache/"]);
        let defaults = strings(&["- /.git/"]);
        let first = RuleSet::compile(Mode::Normal, &patterns, &defaults);
        let second = RuleSet::compile(Mode::Normal, &patterns, &defaults);
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_whitelist_ancestors_are_preserved() {
        // Whitelisting a directory and a file inside it duplicates the
        // ancestor includes; duplicates are harmless and kept verbatim.
        let set = RuleSet::compile(Mode::WhitelistOnly, &strings(&["a", "a/b.txt"]), &[]);
        let lines = set.lines();
        assert_eq!(lines.iter().filter(|l| *l == "+ /a").count(), 2);
        assert_eq!(lines.last().unwrap(), "- *");
    }
}
