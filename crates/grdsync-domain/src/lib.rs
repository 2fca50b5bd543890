use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MappingEntry {
    pub upstream: String,
    pub downstream: String,
}

/// Forward (`upstream -> downstream`) or inverse table, in table order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MappingOutput {
    pub schema_version: u32,
    pub inverse: bool,
    pub entries: Vec<MappingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PathListOutput {
    pub schema_version: u32,
    /// "all" | "top-level" | "generated" | "downstream-only" | "greaselion"
    pub kind: String,
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DriftDocument {
    pub path: String,
    pub orphaned_parts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DriftOutput {
    pub schema_version: u32,
    pub documents: Vec<DriftDocument>,
    /// Downstream documents skipped because they do not exist yet.
    #[serde(default)]
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SyncSummary {
    pub schema_version: u32,
    pub dry_run: bool,
    pub pairs: usize,
    /// Downstream files whose content changed (or would change on a dry run).
    pub changed: Vec<String>,
    pub unchanged: usize,
    pub drift: Vec<DriftDocument>,
    #[serde(default)]
    pub missing: Vec<String>,
}
