//! JSON command-dump artifacts
//!
//! A diagnostic record of exactly what was handed to the transfer tool:
//! the final command line plus both filter descriptions. Written on
//! request; failures are warnings, never fatal.

use chrono::Utc;
use kagami_filter::RuleFile;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct CommandDump<'a> {
    timestamp: String,
    src: String,
    dst: String,
    opts: &'a [String],
    cmd: Vec<String>,
    src_filter: FilterDump<'a>,
    dst_filter: FilterDump<'a>,
}

#[derive(Serialize)]
struct FilterDump<'a> {
    path: Option<String>,
    lines: &'a [String],
}

impl<'a> FilterDump<'a> {
    fn from(file: Option<&'a RuleFile>) -> Self {
        match file {
            Some(f) => Self {
                path: Some(f.path().display().to_string()),
                lines: f.lines(),
            },
            None => Self {
                path: None,
                lines: &[],
            },
        }
    }
}

/// Write the JSON command dump for one tool invocation
#[allow(clippy::too_many_arguments)]
pub fn write(
    path: &Path,
    src: &Path,
    dst: &Path,
    opts: &[String],
    args: &[String],
    src_filter: Option<&RuleFile>,
    dst_filter: Option<&RuleFile>,
) {
    let mut cmd = vec![crate::rsync::RSYNC_BIN.to_string()];
    cmd.extend(args.iter().cloned());

    let payload = CommandDump {
        timestamp: Utc::now().to_rfc3339(),
        src: src.display().to_string(),
        dst: dst.display().to_string(),
        opts,
        cmd,
        src_filter: FilterDump::from(src_filter),
        dst_filter: FilterDump::from(dst_filter),
    };

    let json = match serde_json::to_string_pretty(&payload) {
        Ok(json) => json,
        Err(err) => {
            tracing::warn!(%err, "failed to serialize command dump");
            return;
        }
    };
    match std::fs::write(path, json) {
        Ok(()) => tracing::info!(path = %path.display(), "wrote command dump"),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "failed to write command dump");
        }
    }
}
