//! Compiled filter rules and rule-line parsing

use std::fmt;

/// The sign of a compiled rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// `+`: the matched path stays in the transfer
    Include,
    /// `-`: the matched path is dropped from the transfer
    Exclude,
}

/// A compiled, ordered filter rule: a sign plus a glob pattern
///
/// Rule sequences are totally ordered and never re-sorted; order carries
/// the precedence semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    sign: Sign,
    glob: String,
}

impl Rule {
    /// Create an include rule
    pub fn include(glob: impl Into<String>) -> Self {
        Self {
            sign: Sign::Include,
            glob: glob.into(),
        }
    }

    /// Create an exclude rule
    pub fn exclude(glob: impl Into<String>) -> Self {
        Self {
            sign: Sign::Exclude,
            glob: glob.into(),
        }
    }

    /// The rule's sign
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// The rule's glob pattern text
    pub fn glob(&self) -> &str {
        &self.glob
    }

    /// The rule-file line form, `+ <glob>` or `- <glob>`
    pub fn as_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.sign {
            Sign::Include => '+',
            Sign::Exclude => '-',
        };
        write!(f, "{sign} {}", self.glob)
    }
}

/// Parse one rule-file line
///
/// Accepts the canonical `+ <pattern>` / `- <pattern>` forms, falls back to
/// treating the first character as the sign when the space is missing, and
/// treats any other non-blank line as an implicit exclude. Blank lines are
/// not rules.
pub fn parse_rule_line(line: &str) -> Option<Rule> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if let Some(rest) = line.strip_prefix("+ ") {
        return Some(Rule::include(rest.trim_start()));
    }
    if let Some(rest) = line.strip_prefix("- ") {
        return Some(Rule::exclude(rest.trim_start()));
    }
    if let Some(rest) = line.strip_prefix('+') {
        return Some(Rule::include(rest));
    }
    if let Some(rest) = line.strip_prefix('-') {
        return Some(Rule::exclude(rest));
    }
    Some(Rule::exclude(line))
}

/// Parse a batch of rule-file lines, skipping blanks
pub fn parse_rule_lines<'a, I>(lines: I) -> Vec<Rule>
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().filter_map(parse_rule_line).collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_display_round_trip() {
        let rule = Rule::include("/a/b/**");
        assert_eq!(rule.as_line(), "+ /a/b/**");
        assert_eq!(parse_rule_line(&rule.as_line()).unwrap(), rule);

        let rule = Rule::exclude("*.log");
        assert_eq!(rule.as_line(), "- *.log");
        assert_eq!(parse_rule_line(&rule.as_line()).unwrap(), rule);
    }

    #[test]
    fn test_parse_without_space_after_sign() {
        assert_eq!(parse_rule_line("+/a").unwrap(), Rule::include("/a"));
        assert_eq!(parse_rule_line("-node_modules").unwrap(), Rule::exclude("node_modules"));
    }

    #[test]
    fn test_parse_unsigned_line_is_implicit_exclude() {
        assert_eq!(parse_rule_line("*.tmp").unwrap(), Rule::exclude("*.tmp"));
    }

    #[test]
    fn test_parse_blank_is_none() {
        assert!(parse_rule_line("").is_none());
        assert!(parse_rule_line("   ").is_none());
    }

    #[test]
    fn test_parse_rule_lines_mixed_formats() {
        let parsed = parse_rule_lines(["+ /a", "+ /a/**", "- node_modules", "- *.py"]);
        assert_eq!(parsed[0].sign(), Sign::Include);
        assert_eq!(parsed[1].sign(), Sign::Include);
        assert_eq!(parsed[2].sign(), Sign::Exclude);
        assert_eq!(parsed[3].glob(), "*.py");
    }
}
