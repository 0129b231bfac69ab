//! Markdown sync reports
//!
//! Summarizes one transfer as four sorted sections: Added, Updated,
//! Deleted (classified from the tool's itemized output), and Excluded by
//! filters (from the local evaluator).

use crate::rsync::{Change, ChangeKind};
use std::path::Path;

/// Classified outcome of one transfer, ready to render as markdown
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Source root as shown in the header
    pub source: String,
    /// Destination root as shown in the header
    pub dest: String,
    /// Sync mode label (`one-way` / `two-way`)
    pub mode: String,
    /// Whether the run was a dry run
    pub dry_run: bool,
    /// Paths new on the destination
    pub added: Vec<String>,
    /// Paths that change on the destination
    pub updated: Vec<String>,
    /// Paths removed from the destination
    pub deleted: Vec<String>,
    /// Paths the filter rules keep out of the transfer
    pub excluded: Vec<String>,
}

impl SyncReport {
    /// Build a report from classified changes and the local exclusion list
    pub fn new(
        source: String,
        dest: String,
        mode: String,
        dry_run: bool,
        changes: &[Change],
        mut excluded: Vec<String>,
    ) -> Self {
        let mut added = Vec::new();
        let mut updated = Vec::new();
        let mut deleted = Vec::new();
        for change in changes {
            let bucket = match change.kind {
                ChangeKind::Added => &mut added,
                ChangeKind::Updated => &mut updated,
                ChangeKind::Deleted => &mut deleted,
            };
            bucket.push(change.path.clone());
        }
        added.sort();
        updated.sort();
        deleted.sort();
        excluded.sort();

        Self {
            source,
            dest,
            mode,
            dry_run,
            added,
            updated,
            deleted,
            excluded,
        }
    }

    /// Render the markdown document
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Sync Report\n\n");
        out.push_str(&format!("- Source: `{}`\n", self.source));
        out.push_str(&format!("- Destination: `{}`\n", self.dest));
        out.push_str(&format!("- Mode: {}\n", self.mode));
        out.push_str(&format!("- Dry run: {}\n", self.dry_run));

        push_section(&mut out, "Added", &self.added);
        push_section(&mut out, "Updated", &self.updated);
        push_section(&mut out, "Deleted", &self.deleted);
        push_section(&mut out, "Excluded by filters", &self.excluded);
        out
    }

    /// Write the report to `path`
    ///
    /// A failed write is logged as a warning and otherwise ignored; the
    /// transfer does not depend on the diagnostic artifact.
    pub fn write(&self, path: &Path) {
        match std::fs::write(path, self.to_markdown()) {
            Ok(()) => tracing::info!(path = %path.display(), "wrote sync report"),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "failed to write sync report");
            }
        }
    }
}

fn push_section(out: &mut String, title: &str, paths: &[String]) {
    out.push_str(&format!("\n## {title} ({})\n\n", paths.len()));
    if paths.is_empty() {
        out.push_str("_none_\n");
    } else {
        for path in paths {
            out.push_str(&format!("- `{path}`\n"));
        }
    }
}
