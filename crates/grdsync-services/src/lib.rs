//! High-level engine over the lower-level crates.
//! The CLI only talks to this crate.

mod builder;
mod drift;
mod layout;
mod registry;
mod report;
mod sync;

pub use builder::build_family;
pub use drift::{removed_parts, removed_parts_allowing_missing};
pub use layout::registry_spec;
pub use registry::{FamilySpec, MappingRegistry, RegistrySpec, TOP_LEVEL_EXTS};
pub use report::{drift_output, mapping_output, path_list_output, sync_summary};
pub use sync::{rebase, sync_table, SyncOptions, SyncReport};

pub use grdsync_core::{
    CopyFailure, CopyStage, DriftEntry, DriftReport, FileSystem, GrdSyncError, MappingTable,
    PathMapping, ResourcePath, Result, StdFs,
};
