//! Transfer driver
//!
//! Composes the per-side rule sets from their layered pattern sources,
//! writes them as rule-file artifacts, and either delegates the bulk copy
//! to the external tool or predicts its decisions locally for the listing
//! and reporting paths.

use crate::conflict;
use crate::dump;
use crate::report::SyncReport;
use crate::rsync;
use crate::walk;
use crate::{Error, Result};
use kagami_config::ignores;
use kagami_core::AbsPath;
use kagami_filter::{Mode, RuleFile, RuleSet};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Transfer direction model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Mirror source to destination
    #[default]
    OneWay,
    /// Preserve conflicts, mirror forward, then propagate back
    TwoWay,
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OneWay => "one-way",
            Self::TwoWay => "two-way",
        })
    }
}

impl FromStr for SyncMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "one-way" => Ok(Self::OneWay),
            "two-way" => Ok(Self::TwoWay),
            other => Err(Error::Core(kagami_core::Error::Config(format!(
                "mode must be \"one-way\" or \"two-way\", got {other:?}"
            )))),
        }
    }
}

/// Which side(s) to walk in listing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSide {
    /// Walk the source tree
    Src,
    /// Walk the destination tree
    Dst,
    /// Walk both trees
    Both,
}

impl FromStr for ListSide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "src" => Ok(Self::Src),
            "dst" => Ok(Self::Dst),
            "both" => Ok(Self::Both),
            other => Err(Error::Core(kagami_core::Error::Config(format!(
                "list side must be \"src\", \"dst\" or \"both\", got {other:?}"
            )))),
        }
    }
}

/// Everything one sync invocation needs
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Source tree root
    pub source: AbsPath,
    /// Destination tree root
    pub dest: AbsPath,
    /// Transfer direction
    pub mode: SyncMode,
    /// Ask the tool for a trial run without changes
    pub dry_run: bool,
    /// Also read `.gitignore` from the source tree
    pub use_source_gitignore: bool,
    /// Add a default exclude for hidden directories at the source root
    pub exclude_hidden_dirs: bool,
    /// Use the ignore file as the sole source-side pattern source
    pub only_ignore_file: bool,
    /// Inline source-side exclude patterns
    pub ignore_src: Vec<String>,
    /// Inline destination-side exclude patterns
    pub ignore_dest: Vec<String>,
    /// Whitelist: when non-empty, only the listed paths survive
    pub only: Vec<String>,
    /// Write a JSON command dump to this path
    pub dump_commands: Option<PathBuf>,
    /// Write a markdown report to this path
    pub report: Option<PathBuf>,
    /// Listing mode: predict exclusions locally instead of transferring
    pub list_filtered: Option<ListSide>,
}

impl SyncOptions {
    /// Minimal options for a one-way sync between two roots
    pub fn new(source: AbsPath, dest: AbsPath) -> Self {
        Self {
            source,
            dest,
            mode: SyncMode::OneWay,
            dry_run: false,
            use_source_gitignore: false,
            exclude_hidden_dirs: false,
            only_ignore_file: false,
            ignore_src: Vec::new(),
            ignore_dest: Vec::new(),
            only: Vec::new(),
            dump_commands: None,
            report: None,
            list_filtered: None,
        }
    }
}

/// Excluded paths per side, as predicted by the local evaluator
#[derive(Debug, Default)]
pub struct FilteredListing {
    /// Excluded paths under the source root
    pub src: Vec<String>,
    /// Excluded paths under the destination root
    pub dst: Vec<String>,
}

/// What a sync invocation produced
#[derive(Debug)]
pub enum SyncOutcome {
    /// Files were transferred (or would have been, under dry run)
    Completed,
    /// Listing mode: the paths the evaluator excludes, per side
    Listed(FilteredListing),
    /// Report mode: the classified change report that was written
    Reported(SyncReport),
}

/// Default excludes layered under every rule set: version-control metadata
/// always, hidden directories on request
pub fn default_excludes(exclude_hidden_dirs: bool) -> Vec<String> {
    let mut defaults = vec!["- /.git/".to_string()];
    if exclude_hidden_dirs {
        defaults.push("- .*/".to_string());
    }
    defaults
}

/// Compile the source-side rule set from the layered pattern sources
fn source_rules(opts: &SyncOptions) -> Result<RuleSet> {
    let defaults = default_excludes(opts.exclude_hidden_dirs);
    if !opts.only.is_empty() {
        return Ok(RuleSet::compile(Mode::WhitelistOnly, &opts.only, &defaults));
    }
    let patterns = ignores::source_patterns(
        opts.source.as_path(),
        opts.use_source_gitignore,
        opts.only_ignore_file,
        &opts.ignore_src,
    )?;
    Ok(RuleSet::compile(Mode::Normal, &patterns, &defaults))
}

/// Compile the destination-side rule set, if any patterns were given
fn dest_rules(opts: &SyncOptions) -> Option<RuleSet> {
    if opts.ignore_dest.is_empty() {
        return None;
    }
    let defaults = default_excludes(opts.exclude_hidden_dirs);
    Some(RuleSet::compile(Mode::Normal, &opts.ignore_dest, &defaults))
}

/// Run one sync invocation
pub fn sync(opts: &SyncOptions) -> Result<SyncOutcome> {
    if !opts.source.as_path().is_dir() {
        return Err(Error::SourceMissing(opts.source.as_path().to_path_buf()));
    }

    tracing::info!(
        src = %opts.source,
        dst = %opts.dest,
        mode = %opts.mode,
        dry_run = opts.dry_run,
        "starting sync"
    );

    let src_rules = source_rules(opts)?;
    let dst_rules = dest_rules(opts);

    // Listing mode predicts locally and never invokes the transfer tool.
    if let Some(side) = opts.list_filtered {
        let listing = list_filtered(opts, side, &src_rules, dst_rules.as_ref())?;
        return Ok(SyncOutcome::Listed(listing));
    }

    let src_filter = RuleFile::write(&src_rules)?;
    let dst_filter = dst_rules.as_ref().map(RuleFile::write).transpose()?;

    if let Some(report_path) = opts.report.clone() {
        let report = build_report(opts, &src_rules, &src_filter, dst_filter.as_ref())?;
        report.write(&report_path);
        if !opts.dry_run {
            transfer(opts, &src_filter, dst_filter.as_ref())?;
        }
        return Ok(SyncOutcome::Reported(report));
    }

    transfer(opts, &src_filter, dst_filter.as_ref())?;
    tracing::info!("sync completed");
    Ok(SyncOutcome::Completed)
}

fn transfer(opts: &SyncOptions, src_filter: &RuleFile, dst_filter: Option<&RuleFile>) -> Result<()> {
    match opts.mode {
        SyncMode::OneWay => run_leg(opts, &opts.source, &opts.dest, Some(src_filter), dst_filter),
        SyncMode::TwoWay => {
            // Destination-side edits would be overwritten by the forward
            // pass; keep them next to their source versions first.
            let preserved =
                conflict::preserve_conflicts(opts.source.as_path(), opts.dest.as_path())?;
            if preserved > 0 {
                tracing::warn!(count = preserved, "conflicting files preserved as conflict copies");
            }
            run_leg(opts, &opts.source, &opts.dest, Some(src_filter), dst_filter)?;
            // The reverse pass swaps the filter roles along with the
            // direction.
            run_leg(opts, &opts.dest, &opts.source, dst_filter, Some(src_filter))
        }
    }
}

/// One rsync invocation in one direction
fn run_leg(
    opts: &SyncOptions,
    src: &AbsPath,
    dst: &AbsPath,
    src_filter: Option<&RuleFile>,
    dst_filter: Option<&RuleFile>,
) -> Result<()> {
    let bundle = rsync::base_options(opts.dry_run);
    let args = rsync::build_args(
        &bundle,
        src.as_path(),
        dst.as_path(),
        src_filter.map(RuleFile::path),
        dst_filter.map(RuleFile::path),
    );
    if let Some(dump_path) = &opts.dump_commands {
        dump::write(
            dump_path,
            src.as_path(),
            dst.as_path(),
            &bundle,
            &args,
            src_filter,
            dst_filter,
        );
    }
    rsync::run(&args, opts.dry_run)?;
    Ok(())
}

/// Walk the requested side(s) and collect what the evaluator excludes
fn list_filtered(
    opts: &SyncOptions,
    side: ListSide,
    src_rules: &RuleSet,
    dst_rules: Option<&RuleSet>,
) -> Result<FilteredListing> {
    let mut listing = FilteredListing::default();
    if matches!(side, ListSide::Src | ListSide::Both) {
        listing.src = walk::excluded_files(opts.source.as_path(), src_rules)?;
    }
    if matches!(side, ListSide::Dst | ListSide::Both)
        && let Some(rules) = dst_rules
    {
        listing.dst = walk::excluded_files(opts.dest.as_path(), rules)?;
    }
    Ok(listing)
}

/// Classify a dry run through the tool's itemized output and collect the
/// locally predicted exclusions
fn build_report(
    opts: &SyncOptions,
    src_rules: &RuleSet,
    src_filter: &RuleFile,
    dst_filter: Option<&RuleFile>,
) -> Result<SyncReport> {
    let bundle = rsync::base_options(true);
    let args = rsync::build_args(
        &bundle,
        opts.source.as_path(),
        opts.dest.as_path(),
        Some(src_filter.path()),
        dst_filter.map(RuleFile::path),
    );
    let lines = rsync::run_captured(&args, true)?;
    let changes = rsync::parse_changes(&lines);
    let excluded = walk::excluded_files(opts.source.as_path(), src_rules)?;

    Ok(SyncReport::new(
        opts.source.to_string(),
        opts.dest.to_string(),
        opts.mode.to_string(),
        opts.dry_run,
        &changes,
        excluded,
    ))
}
