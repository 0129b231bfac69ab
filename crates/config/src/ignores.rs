//! Ignore-file reading
//!
//! The source side layers patterns from three places, always in the same
//! order: the per-tree ignore file, an optional `.gitignore`, and inline
//! config/CLI values. The fixed order matters because rule compilation is
//! order-sensitive.

use crate::Result;
use std::fs;
use std::path::Path;

/// Per-tree ignore file consumed on the source side
pub const IGNORE_FILE: &str = ".kagamiignore";

/// Parent VCS ignore file, consulted only when explicitly enabled
pub const GITIGNORE_FILE: &str = ".gitignore";

/// Read patterns from an ignore file
///
/// Non-blank, whitespace-trimmed lines are patterns; `#` comment lines are
/// skipped. A missing file contributes nothing.
pub fn read_patterns(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect())
}

/// Collect the source-side pattern list in fixed precedence order
///
/// Ignore file first, then `.gitignore` when `use_gitignore` is set, then
/// the inline values. With `only_ignore_file` set the ignore file is the
/// sole source.
pub fn source_patterns(
    source_dir: &Path,
    use_gitignore: bool,
    only_ignore_file: bool,
    inline: &[String],
) -> Result<Vec<String>> {
    let mut patterns = read_patterns(&source_dir.join(IGNORE_FILE))?;
    if only_ignore_file {
        return Ok(patterns);
    }
    if use_gitignore {
        patterns.extend(read_patterns(&source_dir.join(GITIGNORE_FILE))?);
    }
    patterns.extend(inline.iter().cloned());
    Ok(patterns)
}
