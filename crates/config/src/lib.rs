//! Configuration management for kagami
//!
//! This crate handles:
//! - TOML configuration loading and validation
//! - Ignore-file reading (pattern sources for the filter compiler)
//! - Logging initialization

pub mod config;
pub mod ignores;
pub mod logging;

// Re-export error types from core
pub use kagami_core::{Error, Result};

// Re-export main types
pub use config::Config;
pub use ignores::{GITIGNORE_FILE, IGNORE_FILE, read_patterns, source_patterns};
