//! TOML configuration loading and validation
//!
//! Defaults live in `kagami.toml` (or `.kagami.toml`), searched first in
//! the source directory and then in the working directory. Command-line
//! values always override config values; the merge itself happens in the
//! CLI layer.

use crate::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names searched per directory, in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["kagami.toml", ".kagami.toml"];

/// Sync configuration
///
/// Every field is optional or defaulted: a config file only needs to state
/// what it wants to change.
///
/// ```toml
/// source = "/srv/project"
/// dest = "/backup/project"
/// mode = "one-way"
/// ignore_src = ["*.log", "!keep.log"]
/// only = []
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Config {
    /// Source tree to mirror from; may also be a git URL
    pub source: Option<String>,
    /// Destination tree to mirror into
    pub dest: Option<PathBuf>,
    /// Sync mode, `one-way` or `two-way`
    pub mode: Option<String>,
    /// Ask the transfer tool for a trial run without changes
    #[serde(default)]
    pub dry_run: bool,
    /// Also read `.gitignore` from the source tree
    #[serde(default)]
    pub use_source_gitignore: bool,
    /// Add a default exclude for hidden directories at the source root
    #[serde(default)]
    pub exclude_hidden_dirs: bool,
    /// Use the ignore file as the sole source-side pattern source
    #[serde(default)]
    pub only_ignore_file: bool,
    /// Inline source-side exclude patterns
    #[serde(default)]
    pub ignore_src: Vec<String>,
    /// Inline destination-side exclude patterns
    #[serde(default)]
    pub ignore_dest: Vec<String>,
    /// Whitelist: when non-empty, only the listed paths survive
    #[serde(default)]
    pub only: Vec<String>,
}

impl Config {
    /// Load and validate a config file
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read, is not valid
    /// TOML, or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Search for a config file next to the source tree, then in the
    /// working directory
    ///
    /// Returns `Ok(None)` when no config file exists anywhere.
    pub fn discover(source_dir: Option<&Path>) -> Result<Option<Self>> {
        let mut roots: Vec<PathBuf> = Vec::new();
        if let Some(dir) = source_dir {
            roots.push(dir.to_path_buf());
        }
        if let Ok(cwd) = std::env::current_dir() {
            roots.push(cwd);
        }

        for root in roots {
            for name in CONFIG_FILE_NAMES {
                let candidate = root.join(name);
                if candidate.exists() {
                    tracing::debug!(path = %candidate.display(), "loading configuration");
                    return Self::load(&candidate).map(Some);
                }
            }
        }
        Ok(None)
    }

    /// Validate constraints the type system cannot express
    pub fn validate(&self) -> Result<()> {
        if let Some(mode) = &self.mode
            && mode != "one-way"
            && mode != "two-way"
        {
            return Err(Error::Config(format!(
                "mode must be \"one-way\" or \"two-way\", got {mode:?}"
            )));
        }
        Ok(())
    }
}
