//! Tree walking for local prediction
//!
//! Listing, reporting, and parity checking all need the same view: every
//! file under a root as a forward-slash relative path, the form the filter
//! matcher operates on.

use crate::Result;
use kagami_core::RelPath;
use kagami_filter::{Decision, RuleSet};
use std::path::Path;
use walkdir::WalkDir;

/// All files under `root`, as forward-slash relative paths, sorted
///
/// Unreadable entries are skipped rather than failing the walk.
pub fn relative_files(root: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(stripped) = entry.path().strip_prefix(root) {
            let rel = RelPath::from_path(stripped)?;
            files.push(rel.as_slash_str());
        }
    }
    files.sort();
    Ok(files)
}

/// Every file under `root` the rule set excludes
pub fn excluded_files(root: &Path, rules: &RuleSet) -> Result<Vec<String>> {
    Ok(relative_files(root)?
        .into_iter()
        .filter(|rel| rules.decide(rel) == Decision::Exclude)
        .collect())
}
