//! Sync command implementation
//!
//! Merges command-line values over config-file defaults, resolves the
//! source (cloning it first when it names a git repository), and hands a
//! fully resolved [`SyncOptions`] to the engine.

use crate::command::Command;
use crate::error::{CommandError, Result};
use clap::Args;
use kagami_config::Config;
use kagami_core::AbsPath;
use kagami_engine::driver::{ListSide, SyncMode, SyncOptions, SyncOutcome};
use kagami_engine::fetch;
use owo_colors::OwoColorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Mirror the source tree into the destination
#[derive(Debug, Args)]
pub struct SyncCommand {
    /// Path to a TOML config file with default options
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Source directory or git URL
    #[arg(long, env = "KAGAMI_SOURCE", value_name = "DIR")]
    pub source: Option<String>,

    /// Destination directory
    #[arg(long, env = "KAGAMI_DEST", value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Sync mode: one-way or two-way
    #[arg(long, value_name = "MODE")]
    pub mode: Option<SyncMode>,

    /// Show what would change without transferring anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Also read .gitignore from the source tree
    #[arg(long)]
    pub use_source_gitignore: bool,

    /// Exclude hidden directories at the source root
    #[arg(long)]
    pub exclude_hidden_dirs: bool,

    /// Use the ignore file as the sole source-side pattern source
    #[arg(long)]
    pub only_ignore_file: bool,

    /// Extra source-side exclude pattern (repeatable)
    #[arg(long = "ignore-src", value_name = "PATTERN")]
    pub ignore_src: Vec<String>,

    /// Extra destination-side exclude pattern (repeatable)
    #[arg(long = "ignore-dest", value_name = "PATTERN")]
    pub ignore_dest: Vec<String>,

    /// Whitelist entry: keep only the listed paths (repeatable)
    #[arg(long = "only", value_name = "PATH")]
    pub only: Vec<String>,

    /// Write the final rsync command and filters to a JSON file
    #[arg(long, value_name = "FILE")]
    pub dump_commands: Option<PathBuf>,

    /// Write a markdown sync report to this path
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// List items the filters would drop instead of syncing (src, dst or both)
    #[arg(long, value_name = "SIDE")]
    pub list_filtered: Option<ListSide>,
}

impl Command for SyncCommand {
    type Output = ();

    fn execute(&self) -> Result<()> {
        let config = self.load_config()?;
        let cfg = config.unwrap_or_default();

        let source = self
            .source
            .clone()
            .or_else(|| cfg.source.clone())
            .ok_or(CommandError::MissingEndpoints)?;
        let dest = self
            .dest
            .clone()
            .or_else(|| cfg.dest.clone())
            .ok_or(CommandError::MissingEndpoints)?;

        // A git source is cloned into a scratch checkout that lives for
        // the duration of the run.
        let fetched = if fetch::looks_like_git_url(&source) {
            Some(fetch::clone_source(&source)?)
        } else {
            None
        };
        let source_path = match &fetched {
            Some(checkout) => checkout.path().to_path_buf(),
            None => PathBuf::from(&source),
        };

        let mode = match self.mode {
            Some(mode) => mode,
            None => cfg
                .mode
                .as_deref()
                .map(str::parse)
                .transpose()?
                .unwrap_or_default(),
        };

        let source_abs = canonicalize_dir(&source_path)?;
        // rsync creates missing destination components itself, but
        // canonicalization needs the directory to exist.
        fs::create_dir_all(&dest)?;
        let dest_abs = canonicalize_dir(&dest)?;

        let opts = SyncOptions {
            source: source_abs,
            dest: dest_abs,
            mode,
            dry_run: self.dry_run || cfg.dry_run,
            use_source_gitignore: self.use_source_gitignore || cfg.use_source_gitignore,
            exclude_hidden_dirs: self.exclude_hidden_dirs || cfg.exclude_hidden_dirs,
            only_ignore_file: self.only_ignore_file || cfg.only_ignore_file,
            ignore_src: merge_list(&self.ignore_src, &cfg.ignore_src),
            ignore_dest: merge_list(&self.ignore_dest, &cfg.ignore_dest),
            only: merge_list(&self.only, &cfg.only),
            dump_commands: self.dump_commands.clone(),
            report: self.report.clone(),
            list_filtered: self.list_filtered,
        };

        tracing::debug!(?opts, "resolved sync options");
        match kagami_engine::sync(&opts)? {
            SyncOutcome::Completed => {}
            SyncOutcome::Listed(listing) => {
                print_side("source", &listing.src);
                if matches!(self.list_filtered, Some(ListSide::Dst | ListSide::Both)) {
                    print_side("destination", &listing.dst);
                }
            }
            SyncOutcome::Reported(report) => {
                println!(
                    "{} added, {} updated, {} deleted, {} excluded by filters",
                    report.added.len(),
                    report.updated.len(),
                    report.deleted.len(),
                    report.excluded.len()
                );
            }
        }
        Ok(())
    }
}

impl SyncCommand {
    /// Explicit config wins; otherwise search the source directory, then
    /// the working directory
    fn load_config(&self) -> Result<Option<Config>> {
        if let Some(path) = &self.config {
            return Ok(Some(Config::load(path)?));
        }
        let source_dir = self
            .source
            .as_deref()
            .filter(|s| !fetch::looks_like_git_url(s))
            .map(Path::new);
        Ok(Config::discover(source_dir)?)
    }
}

/// CLI values override config values; for lists the CLI wins wholesale
fn merge_list(cli: &[String], config: &[String]) -> Vec<String> {
    if cli.is_empty() {
        config.to_vec()
    } else {
        cli.to_vec()
    }
}

fn canonicalize_dir(path: &Path) -> Result<AbsPath> {
    let resolved = fs::canonicalize(path).map_err(|source| CommandError::InvalidPath {
        path: path.display().to_string(),
        source,
    })?;
    Ok(AbsPath::new(resolved)?)
}

fn print_side(label: &str, paths: &[String]) {
    if paths.is_empty() {
        println!("{}", format!("Filtered 0 files on the {label} side").dimmed());
        return;
    }
    println!(
        "{} {} {}",
        "Filtered".bright_white(),
        paths.len().to_string().bright_cyan(),
        format!("files on the {label} side").bright_white()
    );
    for path in paths {
        println!("  {path}");
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_merge_list_cli_wins() {
        let cli = vec!["a".to_string()];
        let config = vec!["b".to_string()];
        assert_eq!(merge_list(&cli, &config), vec!["a"]);
        assert_eq!(merge_list(&[], &config), vec!["b"]);
    }

    #[test]
    fn test_canonicalize_dir_rejects_missing() {
        let err = canonicalize_dir(Path::new("/nonexistent/kagami-cli-test")).unwrap_err();
        assert!(matches!(err, CommandError::InvalidPath { .. }));
    }
}
