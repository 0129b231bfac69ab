//! Type-safe path types
//!
//! This module provides two distinct path types using the newtype pattern:
//!
//! - [`AbsPath`]: Absolute filesystem paths
//! - [`RelPath`]: Relative paths (no leading slash)
//!
//! These types prevent common path manipulation errors at compile time: the
//! transfer driver only accepts absolute source/destination roots, and tree
//! walks only ever hand out paths relative to those roots.
//!
//! # Examples
//!
//! ```
//! use kagami_core::path::{AbsPath, RelPath};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let src = AbsPath::new("/srv/data".into())?;
//! let file = RelPath::new("logs/app.log".into())?;
//! let full = src.join(&file);
//! assert_eq!(full.as_path().to_str().unwrap(), "/srv/data/logs/app.log");
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// An absolute path on the filesystem
///
/// This type guarantees that the path is absolute. Use it for source and
/// destination roots and anywhere a bare `PathBuf` would make it unclear
/// which side of the root/relative split a value sits on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbsPath(PathBuf);

impl AbsPath {
    /// Create a new `AbsPath` from a `PathBuf`
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute.
    pub fn new(path: PathBuf) -> Result<Self> {
        if path.is_absolute() {
            Ok(Self(path))
        } else {
            Err(Error::PathNotAbsolute { path })
        }
    }

    /// Create a new `AbsPath` from a reference to a `Path`
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute.
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::new(path.to_path_buf())
    }

    /// Get the underlying `Path`
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Convert to a `PathBuf`
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// Join with a relative path to create a new absolute path
    pub fn join(&self, rel: &RelPath) -> Self {
        Self(self.0.join(rel.as_path()))
    }
}

impl fmt::Display for AbsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

/// A relative path (no leading slash)
///
/// Values of this type are always relative to some [`AbsPath`] root. The
/// string form uses forward slashes on every platform, which is also the
/// form the filter rule matcher operates on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelPath(PathBuf);

impl RelPath {
    /// Create a new `RelPath` from a `PathBuf`
    ///
    /// # Errors
    ///
    /// Returns an error if the path is absolute.
    pub fn new(path: PathBuf) -> Result<Self> {
        if path.is_absolute() {
            Err(Error::PathNotRelative { path })
        } else {
            Ok(Self(path))
        }
    }

    /// Create a new `RelPath` from a reference to a `Path`
    ///
    /// # Errors
    ///
    /// Returns an error if the path is absolute.
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::new(path.to_path_buf())
    }

    /// Get the underlying `Path`
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Render the path with forward slashes, the form the filter matcher
    /// and the rsync output both use.
    pub fn as_slash_str(&self) -> String {
        let raw = self.0.to_string_lossy();
        if std::path::MAIN_SEPARATOR == '/' {
            raw.into_owned()
        } else {
            raw.replace(std::path::MAIN_SEPARATOR, "/")
        }
    }
}

impl fmt::Display for RelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_slash_str())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_abs_path_rejects_relative() {
        assert!(AbsPath::new("relative/path".into()).is_err());
        assert!(AbsPath::new("/absolute/path".into()).is_ok());
    }

    #[test]
    fn test_rel_path_rejects_absolute() {
        assert!(RelPath::new("/absolute".into()).is_err());
        assert!(RelPath::new("a/b/c".into()).is_ok());
    }

    #[test]
    fn test_join() {
        let root = AbsPath::new("/data".into()).unwrap();
        let rel = RelPath::new("x/y".into()).unwrap();
        assert_eq!(root.join(&rel).as_path(), Path::new("/data/x/y"));
    }

    #[test]
    fn test_slash_str() {
        let rel = RelPath::new("a/b/c.txt".into()).unwrap();
        assert_eq!(rel.as_slash_str(), "a/b/c.txt");
        assert_eq!(rel.to_string(), "a/b/c.txt");
    }
}
