use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::{GrdSyncError, Result};

/// Absolute, lexically normalized path to a resource file.
///
/// `.` components are dropped and `..` folds into its parent without touching
/// the disk, so two spellings of the same location compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourcePath(PathBuf);

impl ResourcePath {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_absolute() {
            return Err(GrdSyncError::NotAbsolute {
                path: path.to_path_buf(),
            });
        }
        Ok(Self(normalize(path)))
    }

    /// Resolve `rel` against `base`. An absolute `rel` wins, as with `Path::join`.
    pub fn resolve(base: &Path, rel: impl AsRef<Path>) -> Result<Self> {
        Self::new(base.join(rel))
    }

    /// Path of `file` next to this one (a part declared by this document).
    pub fn sibling(&self, file: &str) -> Self {
        let dir = self.0.parent().unwrap_or(&self.0);
        Self(normalize(&dir.join(file)))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn file_name(&self) -> Option<&str> {
        self.0.file_name().and_then(|s| s.to_str())
    }

    pub fn extension(&self) -> Option<&str> {
        self.0.extension().and_then(|s| s.to_str())
    }

    pub fn has_extension(&self, ext: &str) -> bool {
        self.extension().is_some_and(|e| e == ext)
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for ResourcePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::Prefix(_) | Component::RootDir => out.push(comp.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // `/..` stays `/`
                out.pop();
            }
            Component::Normal(name) => out.push(name),
        }
    }
    out
}
