//! Parity checking between the local evaluator and the transfer tool
//!
//! Runs the tool in dry-run itemized mode against a scratch destination,
//! computes the set of paths it would transfer, evaluates every file under
//! the source tree locally, and reports every path where the two disagree.
//! Paths the tool does not list are treated as excluded by it.

use crate::Result;
use crate::rsync;
use crate::walk;
use chrono::Utc;
use kagami_filter::{Decision, Mode, RuleFile, RuleSet};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// One disagreement between the local evaluator and the tool
#[derive(Debug, Clone, Serialize)]
pub struct Mismatch {
    /// The relative path the two sides disagree about
    pub path: String,
    /// The local evaluator's verdict
    pub local: Decision,
    /// What the tool's dry run did with the path
    pub rsync: &'static str,
}

/// Full parity comparison result, serializable as the diagnostic payload
#[derive(Debug, Serialize)]
pub struct ParityReport {
    timestamp: String,
    src: String,
    patterns: Vec<String>,
    filter_lines: Vec<String>,
    rsync_included: BTreeSet<String>,
    local_decisions: BTreeMap<String, Decision>,
    mismatches: Vec<Mismatch>,
}

impl ParityReport {
    /// The disagreements found, if any
    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    /// Whether both sides agreed on every path
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Write the JSON diagnostic payload
    ///
    /// Diagnostics are best-effort; a failed write is logged as a warning.
    pub fn write_json(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(%err, "failed to serialize parity diagnostics");
                return;
            }
        };
        match std::fs::write(path, json) {
            Ok(()) => tracing::info!(path = %path.display(), "wrote parity diagnostics"),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "failed to write parity diagnostics");
            }
        }
    }
}

/// Run the parity comparison for `src` under `patterns`
///
/// The patterns are compiled in normal mode with no default excludes, so
/// the comparison exercises exactly the user-supplied rules. A diagnostic
/// JSON payload is written to `dump_json` when given, and to a scratch
/// location whenever mismatches exist.
pub fn parity_check(
    src: &Path,
    patterns: &[String],
    dump_json: Option<&Path>,
) -> Result<ParityReport> {
    let rules = RuleSet::compile(Mode::Normal, patterns, &[]);
    let artifact = RuleFile::write(&rules)?;

    let rsync_included = dry_run_included(src, artifact.path())?;

    let mut local_decisions = BTreeMap::new();
    let mut mismatches = Vec::new();
    for rel in walk::relative_files(src)? {
        let local = rules.decide(&rel);
        let transferred = rsync_included.contains(&rel);
        match (local, transferred) {
            (Decision::Exclude, true) => mismatches.push(Mismatch {
                path: rel.clone(),
                local,
                rsync: "include",
            }),
            (Decision::Include | Decision::Neutral, false) => mismatches.push(Mismatch {
                path: rel.clone(),
                local,
                rsync: "exclude",
            }),
            _ => {}
        }
        local_decisions.insert(rel, local);
    }

    let report = ParityReport {
        timestamp: Utc::now().to_rfc3339(),
        src: src.display().to_string(),
        patterns: patterns.to_vec(),
        filter_lines: artifact.lines().to_vec(),
        rsync_included,
        local_decisions,
        mismatches,
    };

    if let Some(path) = dump_json {
        report.write_json(path);
    } else if !report.is_clean() {
        let auto = std::env::temp_dir().join(format!("kagami-parity-{}.json", Utc::now().timestamp()));
        report.write_json(&auto);
    }

    Ok(report)
}

/// Paths the tool's dry run would transfer, relative to the source root
fn dry_run_included(src: &Path, filter_path: &Path) -> Result<BTreeSet<String>> {
    let scratch_dest = tempfile::Builder::new()
        .prefix("kagami-parity-dest-")
        .tempdir()?;
    let args = vec![
        "-r".to_string(),
        "--dry-run".to_string(),
        "--out-format=%i %n".to_string(),
        "--filter".to_string(),
        format!(". {}", filter_path.display()),
        rsync::slashed(src),
        rsync::slashed(scratch_dest.path()),
    ];

    let lines = rsync::run_captured(&args, true)?;
    let mut included = BTreeSet::new();
    for line in lines {
        let Some((_, name)) = line.trim().split_once(char::is_whitespace) else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() || name == "./" {
            continue;
        }
        included.insert(name.trim_end_matches('/').to_string());
    }
    Ok(included)
}
