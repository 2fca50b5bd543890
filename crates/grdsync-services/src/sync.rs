//! Rebase: overwrite every generated downstream file with its upstream
//! source.
//!
//! Pairs are copied in parallel on the rayon pool; the one-to-one table
//! guarantees no two tasks touch the same destination. Failure policy is
//! collect-and-report: every pair is attempted, then all failures come back
//! together as [`GrdSyncError::Sync`].

use grdsync_core::{
    CopyFailure, CopyStage, DriftReport, FileSystem, GrdSyncError, MappingTable, PathMapping,
    ResourcePath, Result,
};
use rayon::prelude::*;
use std::io;

use crate::drift::{removed_parts, removed_parts_allowing_missing};
use crate::registry::MappingRegistry;

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Plan only: report what would change, write nothing.
    pub dry_run: bool,
    /// Bootstrap a checkout whose generated documents do not exist yet.
    /// Missing downstream documents are listed in the drift report instead
    /// of failing the run.
    pub allow_missing_downstream: bool,
}

#[derive(Debug, Clone)]
pub struct SyncReport {
    pub dry_run: bool,
    pub pairs: usize,
    /// Downstream paths whose content differed from upstream before the run.
    pub changed: Vec<ResourcePath>,
    pub unchanged: usize,
    /// Drift as it was before any file was overwritten.
    pub drift: DriftReport,
}

/// Rebase every generated file of `registry`.
///
/// Drift is measured on the auto-discovered families before copying: once a
/// downstream document has been overwritten it declares exactly the upstream
/// parts and its drift is no longer observable.
pub fn rebase(registry: &MappingRegistry, opts: SyncOptions) -> Result<SyncReport> {
    sync_table(
        registry.file_system(),
        registry.forward()?,
        registry.family_mapping()?,
        opts,
    )
}

/// Copy every pair of `table`, reporting drift of `drift_table` measured
/// beforehand.
///
/// Drift is measured first and its errors are fatal: a downstream document
/// that cannot be parsed stops the run before anything is written.
pub fn sync_table(
    fs: &dyn FileSystem,
    table: &MappingTable,
    drift_table: &MappingTable,
    opts: SyncOptions,
) -> Result<SyncReport> {
    let drift = if opts.allow_missing_downstream {
        removed_parts_allowing_missing(fs, drift_table)?
    } else {
        removed_parts(fs, drift_table)?
    };

    let outcomes: Vec<std::result::Result<bool, CopyFailure>> = table
        .as_slice()
        .par_iter()
        .map(|m| copy_pair(fs, m, opts.dry_run))
        .collect();

    let mut changed = Vec::new();
    let mut unchanged = 0usize;
    let mut failures = Vec::new();
    for (m, outcome) in table.iter().zip(outcomes) {
        match outcome {
            Ok(true) => changed.push(m.downstream.clone()),
            Ok(false) => unchanged += 1,
            Err(e) => {
                tracing::error!(event = "rebase_copy_failed", path = %e.failed_path().display(), error = %e);
                failures.push(e);
            }
        }
    }
    if !failures.is_empty() {
        return Err(GrdSyncError::Sync {
            total: table.len(),
            failures,
            drift,
        });
    }

    tracing::info!(
        event = "rebase_done",
        pairs = table.len(),
        changed = changed.len(),
        unchanged = unchanged,
        dry_run = opts.dry_run
    );
    Ok(SyncReport {
        dry_run: opts.dry_run,
        pairs: table.len(),
        changed,
        unchanged,
        drift,
    })
}

/// Copy one pair verbatim. Returns whether the destination content differed.
fn copy_pair(
    fs: &dyn FileSystem,
    m: &PathMapping,
    dry_run: bool,
) -> std::result::Result<bool, CopyFailure> {
    let fail = |stage, source: io::Error| CopyFailure {
        upstream: m.upstream.as_path().to_path_buf(),
        downstream: m.downstream.as_path().to_path_buf(),
        stage,
        source,
    };
    let contents = fs
        .read_to_string(m.upstream.as_path())
        .map_err(|e| fail(CopyStage::Read, e))?;
    let changed = match fs.read_to_string(m.downstream.as_path()) {
        Ok(current) => current != contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => true,
        Err(e) => return Err(fail(CopyStage::ReadDestination, e)),
    };
    if !dry_run {
        fs.write(m.downstream.as_path(), &contents)
            .map_err(|e| fail(CopyStage::Write, e))?;
    }
    tracing::trace!(event = "rebase_pair", to = %m.downstream, changed = changed);
    Ok(changed)
}
