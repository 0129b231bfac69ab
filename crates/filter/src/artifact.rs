//! Rule-file artifacts
//!
//! A compiled rule set is serialized into a temporary file the external
//! transfer tool references through a merge-filter directive. The artifact
//! is exclusively owned by the invocation that created it: dropping the
//! [`RuleFile`] removes the file, on success and failure paths alike.

use crate::Result;
use crate::compile::RuleSet;
use crate::rule::{self, Rule};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// A rule set serialized to a temporary file, together with the in-memory
/// lines used by the local evaluator
#[derive(Debug)]
pub struct RuleFile {
    file: NamedTempFile,
    lines: Vec<String>,
}

impl RuleFile {
    /// Serialize `rules` into a fresh temporary artifact
    pub fn write(rules: &RuleSet) -> Result<Self> {
        let lines = rules.lines();
        let mut file = tempfile::Builder::new()
            .prefix("kagami-rules-")
            .suffix(".rules")
            .tempfile()?;
        file.write_all(lines.join("\n").as_bytes())?;
        file.write_all(b"\n")?;
        file.flush()?;
        Ok(Self { file, lines })
    }

    /// Filesystem location of the artifact
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// The rule lines as written, in order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Re-parse the on-disk artifact into rules
    ///
    /// Evaluating the reloaded rules must agree with evaluating the
    /// in-memory set for every path; the integration tests pin this
    /// round-trip property.
    pub fn reload(&self) -> Result<Vec<Rule>> {
        let text = std::fs::read_to_string(self.file.path())?;
        Ok(rule::parse_rule_lines(text.lines()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use crate::compile::Mode;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_write_and_reload() {
        let set = RuleSet::compile(
            Mode::Normal,
            &strings(&["*.log", "!keep/data"]),
            &strings(&["- /.git/"]),
        );
        let artifact = RuleFile::write(&set).unwrap();

        assert!(artifact.path().exists());
        assert_eq!(artifact.lines(), set.lines().as_slice());

        let reloaded = artifact.reload().unwrap();
        assert_eq!(reloaded, set.rules());
    }

    #[test]
    fn test_artifact_removed_on_drop() {
        let set = RuleSet::compile(Mode::Normal, &strings(&["*.log"]), &[]);
        let artifact = RuleFile::write(&set).unwrap();
        let path = artifact.path().to_path_buf();
        assert!(path.exists());
        drop(artifact);
        assert!(!path.exists());
    }
}
