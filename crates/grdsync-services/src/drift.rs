use grdsync_core::{DriftEntry, DriftReport, FileSystem, MappingTable, Result, GRD_EXT};
use grdsync_parsers::read_part_files;
use std::collections::{BTreeSet, HashSet};

/// Re-read every mapped `.grd` pair and report downstream parts upstream
/// dropped. Reads are live; nothing is cached between calls.
///
/// Both documents of every pair must exist: a missing one is a
/// [`grdsync_core::GrdSyncError::NotFound`] naming it.
pub fn removed_parts(fs: &dyn FileSystem, table: &MappingTable) -> Result<DriftReport> {
    detect(fs, table, false)
}

/// Like [`removed_parts`], but a downstream document that does not exist yet
/// is recorded in [`DriftReport::missing`] instead of failing. Meant for a
/// checkout that has never been synced.
pub fn removed_parts_allowing_missing(
    fs: &dyn FileSystem,
    table: &MappingTable,
) -> Result<DriftReport> {
    detect(fs, table, true)
}

fn detect(fs: &dyn FileSystem, table: &MappingTable, allow_missing: bool) -> Result<DriftReport> {
    let mut report = DriftReport::default();
    for m in table {
        if !m.downstream.has_extension(GRD_EXT) {
            continue;
        }
        if allow_missing && !fs.exists(m.downstream.as_path()) {
            tracing::warn!(event = "drift_downstream_missing", path = %m.downstream);
            report.push_missing(m.downstream.clone());
            continue;
        }
        let downstream_parts = read_part_files(fs, m.downstream.as_path())?;
        let upstream_parts: HashSet<String> =
            read_part_files(fs, m.upstream.as_path())?.into_iter().collect();

        let orphaned: BTreeSet<String> = downstream_parts
            .into_iter()
            .filter(|p| !upstream_parts.contains(p))
            .collect();
        if !orphaned.is_empty() {
            tracing::debug!(event = "drift_found", path = %m.downstream, parts = orphaned.len());
            report.push(DriftEntry {
                document: m.downstream.clone(),
                orphaned,
            });
        }
    }
    Ok(report)
}
