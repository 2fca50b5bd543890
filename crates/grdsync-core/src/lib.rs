//! Shared vocabulary for the grdsync crates.
//!
//! Everything that crosses a crate boundary lives here: the validated
//! [`ResourcePath`], the ordered one-to-one [`MappingTable`], the
//! [`FileSystem`] seam, the drift report and the workspace error type.

mod drift;
mod error;
mod fs;
mod path;
mod table;

pub use drift::{DriftEntry, DriftReport};
pub use error::{CopyFailure, CopyStage, GrdSyncError};
pub use fs::{FileSystem, StdFs};
pub use path::ResourcePath;
pub use table::{MappingTable, PathMapping};

/// Workspace-wide result alias.
pub type Result<T, E = GrdSyncError> = std::result::Result<T, E>;

/// Extension of a top-level resource document.
pub const GRD_EXT: &str = "grd";
