use grdsync_core::{DriftReport, MappingTable, ResourcePath};
use grdsync_domain::{
    DriftDocument, DriftOutput, MappingEntry, MappingOutput, PathListOutput, SyncSummary,
    SCHEMA_VERSION,
};

use crate::sync::SyncReport;

pub fn mapping_output(table: &MappingTable, inverse: bool) -> MappingOutput {
    MappingOutput {
        schema_version: SCHEMA_VERSION,
        inverse,
        entries: table
            .iter()
            .map(|m| MappingEntry {
                upstream: m.upstream.to_string(),
                downstream: m.downstream.to_string(),
            })
            .collect(),
    }
}

pub fn path_list_output<'a>(
    kind: &str,
    paths: impl IntoIterator<Item = &'a ResourcePath>,
) -> PathListOutput {
    PathListOutput {
        schema_version: SCHEMA_VERSION,
        kind: kind.to_string(),
        paths: paths.into_iter().map(|p| p.to_string()).collect(),
    }
}

fn drift_documents(report: &DriftReport) -> Vec<DriftDocument> {
    report
        .iter()
        .map(|e| DriftDocument {
            path: e.document.to_string(),
            orphaned_parts: e.orphaned.iter().cloned().collect(),
        })
        .collect()
}

fn missing_documents(report: &DriftReport) -> Vec<String> {
    report.missing().iter().map(|p| p.to_string()).collect()
}

pub fn drift_output(report: &DriftReport) -> DriftOutput {
    DriftOutput {
        schema_version: SCHEMA_VERSION,
        documents: drift_documents(report),
        missing: missing_documents(report),
    }
}

pub fn sync_summary(report: &SyncReport) -> SyncSummary {
    SyncSummary {
        schema_version: SCHEMA_VERSION,
        dry_run: report.dry_run,
        pairs: report.pairs,
        changed: report.changed.iter().map(|p| p.to_string()).collect(),
        unchanged: report.unchanged,
        drift: drift_documents(&report.drift),
        missing: missing_documents(&report.drift),
    }
}
