use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::DriftReport;

/// Every error the library crates can surface. Fatal variants always carry
/// the offending path so the operator can find the broken reference.
#[derive(Debug, Error)]
pub enum GrdSyncError {
    #[error("resource document not found at path \"{}\"", .path.display())]
    NotFound { path: PathBuf },

    #[error("part \"{}\" references one of its ancestors ({chain})", .path.display())]
    Cycle { path: PathBuf, chain: String },

    #[error(
        "mapping is not one-to-one at \"{}\": already paired with \"{}\", refusing \"{}\"",
        .path.display(),
        .existing.display(),
        .conflicting.display()
    )]
    Invariant {
        path: PathBuf,
        existing: PathBuf,
        conflicting: PathBuf,
    },

    #[error("malformed resource document \"{}\": {message}", .path.display())]
    Xml { path: PathBuf, message: String },

    #[error("malformed JSON in \"{}\": {message}", .path.display())]
    Json { path: PathBuf, message: String },

    #[error("I/O error at \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path \"{}\" is not absolute", .path.display())]
    NotAbsolute { path: PathBuf },

    /// Some copies failed. `drift` is the report measured before copying.
    #[error("{} of {total} copy operations failed", .failures.len())]
    Sync {
        total: usize,
        failures: Vec<CopyFailure>,
        drift: DriftReport,
    },
}

impl GrdSyncError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Which step of a copy failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStage {
    /// Reading the upstream source.
    Read,
    /// Reading the current destination to compare against.
    ReadDestination,
    Write,
}

impl fmt::Display for CopyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyStage::Read => f.write_str("read"),
            CopyStage::ReadDestination => f.write_str("destination read"),
            CopyStage::Write => f.write_str("write"),
        }
    }
}

/// One failed upstream -> downstream copy.
#[derive(Debug, Error)]
#[error(
    "{stage} failed copying \"{}\" -> \"{}\": {source}",
    .upstream.display(),
    .downstream.display()
)]
pub struct CopyFailure {
    pub upstream: PathBuf,
    pub downstream: PathBuf,
    pub stage: CopyStage,
    #[source]
    pub source: io::Error,
}

impl CopyFailure {
    /// The path whose operation actually failed.
    pub fn failed_path(&self) -> &PathBuf {
        match self.stage {
            CopyStage::Read => &self.upstream,
            CopyStage::ReadDestination | CopyStage::Write => &self.downstream,
        }
    }
}
