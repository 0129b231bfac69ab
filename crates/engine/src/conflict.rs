//! Two-way conflict preservation
//!
//! Before a two-way sync overwrites destination-side edits, every file
//! that exists on both sides with differing content gets its destination
//! version copied beside the source file as
//! `<name>.conflict-<mtime-epoch>`. The pre-pass works purely on byte
//! content and timestamps and is independent of rule compilation.

use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use walkdir::WalkDir;

/// Preserve destination-side versions of files that differ on both sides
///
/// Best-effort: unreadable files and failed copies are logged and skipped.
/// Returns the number of conflict copies created.
pub fn preserve_conflicts(src: &Path, dst: &Path) -> Result<usize> {
    let mut preserved = 0;

    for entry in WalkDir::new(dst)
        .into_iter()
        .filter_map(std::result::Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(dst) else {
            continue;
        };
        let source_path = src.join(rel);
        if !source_path.is_file() {
            continue;
        }

        match files_differ(&source_path, entry.path()) {
            Ok(false) => {}
            Ok(true) => {
                let Some(conflict) = conflict_name(&source_path, entry.path()) else {
                    continue;
                };
                match fs::copy(entry.path(), &conflict) {
                    Ok(_) => {
                        tracing::info!(path = %conflict.display(), "preserved conflicting destination version");
                        preserved += 1;
                    }
                    Err(err) => {
                        tracing::debug!(path = %conflict.display(), %err, "failed to write conflict copy");
                    }
                }
            }
            Err(err) => {
                tracing::debug!(path = %entry.path().display(), %err, "skipping unreadable file in conflict scan");
            }
        }
    }

    Ok(preserved)
}

fn files_differ(a: &Path, b: &Path) -> std::io::Result<bool> {
    Ok(fs::read(a)? != fs::read(b)?)
}

/// `<source file>.conflict-<destination mtime>` beside the source file
fn conflict_name(source_path: &Path, dst_path: &Path) -> Option<PathBuf> {
    let mtime = fs::metadata(dst_path).ok()?.modified().ok()?;
    let epoch = mtime.duration_since(UNIX_EPOCH).ok()?.as_secs();
    let name = source_path.file_name()?.to_string_lossy().into_owned();
    Some(source_path.with_file_name(format!("{name}.conflict-{epoch}")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_differing_files_are_preserved() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();

        fs::create_dir_all(src.path().join("sub")).unwrap();
        fs::create_dir_all(dst.path().join("sub")).unwrap();
        fs::write(src.path().join("sub/a.txt"), "source version").unwrap();
        fs::write(dst.path().join("sub/a.txt"), "dest version").unwrap();

        let preserved = preserve_conflicts(src.path(), dst.path()).unwrap();
        assert_eq!(preserved, 1);

        let copies: Vec<_> = fs::read_dir(src.path().join("sub"))
            .unwrap()
            .filter_map(std::result::Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("a.txt.conflict-"))
            .collect();
        assert_eq!(copies.len(), 1);

        let copy = src.path().join("sub").join(&copies[0]);
        assert_eq!(fs::read_to_string(copy).unwrap(), "dest version");
    }

    #[test]
    fn test_identical_files_are_left_alone() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();

        fs::write(src.path().join("same.txt"), "identical").unwrap();
        fs::write(dst.path().join("same.txt"), "identical").unwrap();

        assert_eq!(preserve_conflicts(src.path(), dst.path()).unwrap(), 0);
        assert_eq!(fs::read_dir(src.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_dest_only_files_are_ignored() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();

        fs::write(dst.path().join("only-here.txt"), "new").unwrap();

        assert_eq!(preserve_conflicts(src.path(), dst.path()).unwrap(), 0);
    }
}
