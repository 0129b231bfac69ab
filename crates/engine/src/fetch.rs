//! Remote source fetching
//!
//! A source argument may name a git repository instead of a local
//! directory. It is shallow-cloned into a scratch directory owned by the
//! invocation; when the clone fails no transfer is attempted, and the
//! scratch directory is removed on every exit path either way.

use crate::{Error, Result};
use std::path::Path;
use tempfile::TempDir;

/// Whether `source` names a git repository rather than a local path
pub fn looks_like_git_url(source: &str) -> bool {
    source.starts_with("git@")
        || source.starts_with("git://")
        || source.ends_with(".git")
        || (source.contains("github.com") && !source.contains(".zip"))
}

/// A cloned source tree
///
/// The checkout disappears when this value drops.
#[derive(Debug)]
pub struct FetchedSource {
    scratch: TempDir,
}

impl FetchedSource {
    /// Root of the cloned working tree
    pub fn path(&self) -> &Path {
        self.scratch.path()
    }
}

/// Shallow-clone `url` into a scratch directory
pub fn clone_source(url: &str) -> Result<FetchedSource> {
    let scratch = TempDir::with_prefix("kagami-clone-")?;
    tracing::info!(url, path = %scratch.path().display(), "cloning git source");

    let mut fetch_options = git2::FetchOptions::new();
    fetch_options.depth(1);

    let mut builder = git2::build::RepoBuilder::new();
    builder.fetch_options(fetch_options);
    builder
        .clone(url, scratch.path())
        .map_err(|source| Error::CloneFailed {
            url: url.to_string(),
            source,
        })?;

    tracing::debug!(url, "clone finished");
    Ok(FetchedSource { scratch })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_git_url_detection() {
        assert!(looks_like_git_url("git@github.com:owner/repo.git"));
        assert!(looks_like_git_url("git://host/repo"));
        assert!(looks_like_git_url("https://example.com/project.git"));
        assert!(looks_like_git_url("https://github.com/owner/repo"));

        assert!(!looks_like_git_url("/local/path"));
        assert!(!looks_like_git_url("relative/dir"));
        assert!(!looks_like_git_url("https://github.com/owner/repo/archive.zip"));
    }

    #[test]
    fn test_clone_failure_is_reported() {
        let result = clone_source("/nonexistent/definitely-not-a-repo.git");
        assert!(matches!(result, Err(Error::CloneFailed { .. })));
    }
}
