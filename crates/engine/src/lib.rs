//! Transfer engine for kagami
//!
//! Composes filter rule sets for both sides of a transfer, drives the
//! external `rsync` binary, and predicts its decisions locally for the
//! listing, reporting, and parity-checking paths.
//!
//! Everything here is synchronous and single-threaded; the only blocking
//! points are the subprocess calls and the tree walks. Temporary artifacts
//! (rule files, clone checkouts, parity scratch destinations) are owned by
//! the invocation that created them and removed on every exit path.

pub mod conflict;
pub mod driver;
pub mod dump;
pub mod error;
pub mod fetch;
pub mod parity;
pub mod report;
pub mod rsync;
pub mod walk;

pub use driver::{FilteredListing, ListSide, SyncMode, SyncOptions, SyncOutcome, sync};
pub use error::{Error, Result};
pub use parity::{Mismatch, ParityReport, parity_check};
pub use report::SyncReport;
