//! Filter rule compilation and local decision evaluation
//!
//! This crate turns user-authored ignore patterns (gitignore-like, with a
//! leading `!` for "force include") into the ordered, signed rule list the
//! rsync filter-file mini-language expects, and evaluates those rules
//! against relative paths with last-match-wins precedence.
//!
//! The two halves are deliberately independent:
//!
//! - [`RuleSet::compile`] is a pure translation from patterns to rules and
//!   never touches the filesystem.
//! - [`decide`] is a pure function over `(path, rules)` and can therefore be
//!   cross-validated against the real transfer tool's observed behavior.
//!
//! [`RuleFile`] bridges the two worlds: it serializes a compiled rule set
//! into a temporary artifact for the external tool while keeping the
//! in-memory lines available to the local evaluator.

pub mod artifact;
pub mod compile;
pub mod decision;
pub mod matcher;
pub mod pattern;
pub mod rule;

pub use artifact::RuleFile;
pub use compile::{Mode, RuleSet};
pub use decision::{Decision, decide};
pub use pattern::{Pattern, Polarity};
pub use rule::{Rule, Sign, parse_rule_line, parse_rule_lines};

use thiserror::Error;

/// Errors produced by this crate
///
/// Pattern problems are never errors: unparsable patterns are skipped and
/// glob-translation failures degrade to a fallback matcher. Only artifact
/// I/O can fail.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error while writing or re-reading a rule-file artifact
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
