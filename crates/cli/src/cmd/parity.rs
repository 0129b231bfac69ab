//! Parity command implementation
//!
//! Standalone cross-validation entry point: runs the transfer tool in
//! dry-run mode with the same rule file the sync path would pass, and
//! compares its transfer set against the local evaluator's verdicts.
//! Exit code 0 means full agreement, 2 means mismatches were found, and
//! anything else is a harness failure.

use crate::command::Command;
use crate::error::{CommandError, Result};
use clap::{ArgGroup, Args};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Cross-validate the local evaluator against the tool's dry run
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("pattern_source").required(true).args(["patterns", "pattern"])))]
pub struct ParityCommand {
    /// Source directory to evaluate
    #[arg(long, value_name = "DIR")]
    pub src: PathBuf,

    /// Newline-separated pattern file
    #[arg(long, value_name = "FILE")]
    pub patterns: Option<PathBuf>,

    /// Inline pattern (repeatable)
    #[arg(long = "pattern", value_name = "PATTERN")]
    pub pattern: Vec<String>,

    /// Write the JSON diagnostic payload to this path
    #[arg(long, value_name = "FILE")]
    pub dump_json: Option<PathBuf>,
}

impl Command for ParityCommand {
    type Output = ExitCode;

    fn execute(&self) -> Result<ExitCode> {
        let patterns = self.collect_patterns()?;
        let src = fs::canonicalize(&self.src).map_err(|source| CommandError::InvalidPath {
            path: self.src.display().to_string(),
            source,
        })?;

        let report = kagami_engine::parity_check(&src, &patterns, self.dump_json.as_deref())?;

        if report.is_clean() {
            println!("No mismatches: local evaluator and rsync dry run agree for all files.");
            return Ok(ExitCode::SUCCESS);
        }

        println!("Found {} mismatches:", report.mismatches().len());
        for mismatch in report.mismatches().iter().take(200) {
            println!(
                "  - {} local={} rsync={}",
                mismatch.path,
                mismatch.local.as_str(),
                mismatch.rsync
            );
        }
        println!(
            "\nNote: paths the dry run does not list are treated as excluded by rsync under these filters."
        );
        Ok(ExitCode::from(2))
    }
}

impl ParityCommand {
    fn collect_patterns(&self) -> Result<Vec<String>> {
        match &self.patterns {
            Some(path) => {
                let content =
                    fs::read_to_string(path).map_err(|source| CommandError::PatternFile {
                        path: path.clone(),
                        source,
                    })?;
                Ok(content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(ToString::to_string)
                    .collect())
            }
            None => Ok(self.pattern.clone()),
        }
    }
}
