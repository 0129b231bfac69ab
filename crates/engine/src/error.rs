//! Error types for the transfer engine

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while driving a transfer
#[derive(Error, Debug)]
pub enum Error {
    /// The external transfer tool is not installed
    #[error("rsync not found on PATH; install rsync to perform transfers")]
    RsyncMissing,

    /// The external transfer tool exited with a failure status
    #[error("rsync exited with status {code}")]
    RsyncFailed {
        /// The tool's exit code
        code: i32,
    },

    /// The external transfer tool was terminated by a signal
    #[error("rsync was terminated by a signal")]
    RsyncKilled,

    /// Cloning a remote git source failed
    #[error("failed to clone git source {url}")]
    CloneFailed {
        /// The URL that failed to clone
        url: String,
        /// The underlying git error
        #[source]
        source: git2::Error,
    },

    /// The source directory does not exist
    #[error("source directory does not exist: {0}")]
    SourceMissing(PathBuf),

    /// Rule-file artifact error
    #[error("filter artifact error: {0}")]
    Filter(#[from] kagami_filter::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the foundation crate
    #[error(transparent)]
    Core(#[from] kagami_core::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
