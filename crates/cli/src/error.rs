//! Error types for CLI commands
//!
//! Structured error types using thiserror; configuration problems and
//! engine failures stay distinguishable all the way to the exit status.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during command execution
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CommandError {
    /// Neither the CLI nor the config file provided source and destination
    #[error("source and dest must be provided either via CLI or config file")]
    MissingEndpoints,

    /// A path argument could not be resolved
    #[error("Invalid path: {path}")]
    InvalidPath {
        /// The path that failed to resolve
        path: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A pattern file could not be read
    #[error("failed to read pattern file {path}")]
    PatternFile {
        /// The pattern file path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error(transparent)]
    Config(#[from] kagami_core::Error),

    /// Transfer engine error
    #[error(transparent)]
    Engine(#[from] kagami_engine::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for command operations
pub type Result<T> = std::result::Result<T, CommandError>;
