//! rsync invocation and itemized-output parsing
//!
//! The engine never reimplements the bulk copy; it builds argument vectors
//! for the system `rsync`, runs it as a subprocess, and interprets its
//! `--itemize-changes` output.

use crate::{Error, Result};
use std::path::Path;
use std::process::ExitStatus;

/// Name of the external transfer tool binary
pub const RSYNC_BIN: &str = "rsync";

/// Exit codes that signal a partial transfer rather than a hard failure
const PARTIAL_EXIT_CODES: [i32; 2] = [23, 24];

/// Verify the transfer tool is present on PATH
pub fn ensure_available() -> Result<()> {
    which::which(RSYNC_BIN)
        .map(|_| ())
        .map_err(|_| Error::RsyncMissing)
}

/// The fixed option bundle every transfer uses: archive mode, checksums,
/// itemized-change output, deletion of extraneous destination files
pub fn base_options(dry_run: bool) -> Vec<String> {
    let mut opts = vec![
        "-a".to_string(),
        "--human-readable".to_string(),
        "--itemize-changes".to_string(),
        "--partial".to_string(),
        "--delete".to_string(),
    ];
    if dry_run {
        opts.push("--dry-run".to_string());
    }
    opts.push("--checksum".to_string());
    opts
}

/// Normalize a directory argument to the trailing-slash form rsync treats
/// as "contents of this directory"
pub fn slashed(path: &Path) -> String {
    let raw = path.to_string_lossy();
    format!("{}/", raw.trim_end_matches('/'))
}

/// Assemble the full argument vector: options, per-side merge filters,
/// then trailing-slash-normalized source and destination
pub fn build_args(
    opts: &[String],
    src: &Path,
    dst: &Path,
    src_filter: Option<&Path>,
    dst_filter: Option<&Path>,
) -> Vec<String> {
    let mut args = opts.to_vec();
    // Source filters come first so source-side include rules take
    // precedence over destination-side excludes.
    if let Some(path) = src_filter {
        args.push("--filter".to_string());
        args.push(format!(". {}", path.display()));
    }
    if let Some(path) = dst_filter {
        args.push("--filter".to_string());
        args.push(format!(". {}", path.display()));
    }
    args.push(slashed(src));
    args.push(slashed(dst));
    args
}

/// Run rsync with `args`, re-logging its output line by line
///
/// `tolerate_partial` downgrades exit codes 23/24 to a warning, which the
/// dry-run analysis paths rely on.
pub fn run(args: &[String], tolerate_partial: bool) -> Result<Vec<String>> {
    ensure_available()?;
    tracing::debug!(cmd = %display_cmd(args), "invoking transfer tool");

    let output = duct::cmd(RSYNC_BIN, args)
        .stderr_to_stdout()
        .stdout_capture()
        .unchecked()
        .run()?;

    let lines = split_lines(&output.stdout);
    for line in &lines {
        if !line.trim().is_empty() {
            tracing::info!("{line}");
        }
    }

    check_status(output.status, tolerate_partial)?;
    Ok(lines)
}

/// Run rsync capturing stdout only, without re-logging
///
/// Used by the dry-run analysis paths that parse the output instead of
/// showing it.
pub fn run_captured(args: &[String], tolerate_partial: bool) -> Result<Vec<String>> {
    ensure_available()?;
    tracing::debug!(cmd = %display_cmd(args), "invoking transfer tool (captured)");

    let output = duct::cmd(RSYNC_BIN, args)
        .stdout_capture()
        .stderr_capture()
        .unchecked()
        .run()?;

    check_status(output.status, tolerate_partial)?;
    Ok(split_lines(&output.stdout))
}

fn display_cmd(args: &[String]) -> String {
    let mut cmd = RSYNC_BIN.to_string();
    for arg in args {
        cmd.push(' ');
        cmd.push_str(arg);
    }
    cmd
}

fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(ToString::to_string)
        .collect()
}

fn check_status(status: ExitStatus, tolerate_partial: bool) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    match status.code() {
        Some(code) if tolerate_partial && PARTIAL_EXIT_CODES.contains(&code) => {
            tracing::warn!(code, "transfer tool reported a partial transfer");
            Ok(())
        }
        Some(code) => Err(Error::RsyncFailed { code }),
        None => Err(Error::RsyncKilled),
    }
}

/// Classification of one itemized change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// The path is new on the destination
    Added,
    /// The path exists on the destination and will change
    Updated,
    /// The path will be removed from the destination
    Deleted,
}

/// One classified change from the tool's itemized output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    /// What happens to the path
    pub kind: ChangeKind,
    /// Path relative to the transfer root
    pub path: String,
}

/// Parse one `--itemize-changes` output line
///
/// `*`-marked lines (`*deleting   path`) are deletions, a `+` in the
/// itemize code is a creation, any other itemized line is an update.
/// Summary lines (`sending incremental file list`, byte counters) and the
/// root entry `./` yield `None`.
pub fn parse_itemized(line: &str) -> Option<Change> {
    let (code, rest) = line.trim_end().split_once(' ')?;
    let path = rest.trim();
    if path.is_empty() || path == "./" {
        return None;
    }

    if code.starts_with('*') {
        return Some(Change {
            kind: ChangeKind::Deleted,
            path: path.trim_end_matches('/').to_string(),
        });
    }
    if !is_itemize_code(code) {
        return None;
    }

    let kind = if code.contains('+') {
        ChangeKind::Added
    } else {
        ChangeKind::Updated
    };
    Some(Change {
        kind,
        path: path.trim_end_matches('/').to_string(),
    })
}

/// Itemize codes are 11 characters starting with the update type
/// (`<`, `>`, `c`, `h`, `.`)
fn is_itemize_code(code: &str) -> bool {
    code.len() >= 9 && code.starts_with(['<', '>', 'c', 'h', '.'])
}

/// Classify every itemized line in a captured output
pub fn parse_changes(lines: &[String]) -> Vec<Change> {
    lines.iter().filter_map(|l| parse_itemized(l)).collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_base_options_bundle() {
        let opts = base_options(false);
        assert!(opts.contains(&"-a".to_string()));
        assert!(opts.contains(&"--checksum".to_string()));
        assert!(opts.contains(&"--itemize-changes".to_string()));
        assert!(!opts.contains(&"--dry-run".to_string()));

        assert!(base_options(true).contains(&"--dry-run".to_string()));
    }

    #[test]
    fn test_slashed_normalization() {
        assert_eq!(slashed(Path::new("/a/b")), "/a/b/");
        assert_eq!(slashed(Path::new("/a/b/")), "/a/b/");
    }

    #[test]
    fn test_build_args_order() {
        let opts = vec!["-a".to_string()];
        let src_filter = PathBuf::from("/tmp/src.rules");
        let args = build_args(
            &opts,
            Path::new("/src"),
            Path::new("/dst"),
            Some(&src_filter),
            None,
        );
        assert_eq!(
            args,
            vec!["-a", "--filter", ". /tmp/src.rules", "/src/", "/dst/"]
        );
    }

    #[test]
    fn test_parse_itemized_created_file() {
        let change = parse_itemized(">f+++++++++ main.js").unwrap();
        assert_eq!(change.kind, ChangeKind::Added);
        assert_eq!(change.path, "main.js");
    }

    #[test]
    fn test_parse_itemized_created_directory() {
        let change = parse_itemized("cd+++++++++ assets/").unwrap();
        assert_eq!(change.kind, ChangeKind::Added);
        assert_eq!(change.path, "assets");
    }

    #[test]
    fn test_parse_itemized_updated_file() {
        let change = parse_itemized(">f..t...... config.toml").unwrap();
        assert_eq!(change.kind, ChangeKind::Updated);
        assert_eq!(change.path, "config.toml");
    }

    #[test]
    fn test_parse_itemized_deletion() {
        let change = parse_itemized("*deleting   old/config.yml").unwrap();
        assert_eq!(change.kind, ChangeKind::Deleted);
        assert_eq!(change.path, "old/config.yml");
    }

    #[test]
    fn test_parse_itemized_skips_noise() {
        assert!(parse_itemized("sending incremental file list").is_none());
        assert!(parse_itemized("sent 1,234 bytes  received 56 bytes").is_none());
        assert!(parse_itemized("total size is 9.8K  speedup is 1.00").is_none());
        assert!(parse_itemized(".d..t...... ./").is_none());
        assert!(parse_itemized("").is_none());
    }

    #[test]
    fn test_parse_changes_batch() {
        let lines = vec![
            "sending incremental file list".to_string(),
            ">f+++++++++ a.txt".to_string(),
            ">f.st...... b.txt".to_string(),
            "*deleting   c.txt".to_string(),
        ];
        let changes = parse_changes(&lines);
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0].kind, ChangeKind::Added);
        assert_eq!(changes[1].kind, ChangeKind::Updated);
        assert_eq!(changes[2].kind, ChangeKind::Deleted);
    }
}
