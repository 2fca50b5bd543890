use grdsync_core::{FileSystem, MappingTable, ResourcePath, Result, StdFs};
use once_cell::sync::OnceCell;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::builder::build_family;

/// Extensions of files translation tooling handles as a unit. Parts are not
/// listed: only one translation bundle is produced per root document.
pub const TOP_LEVEL_EXTS: &[&str] = &["grd", "json"];

/// A root document whose parts are discovered recursively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilySpec {
    pub upstream: ResourcePath,
    pub downstream: ResourcePath,
    pub exclude: BTreeSet<String>,
}

/// Static input of a [`MappingRegistry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrySpec {
    /// Explicit pairs for documents renamed downstream. Listed parts-first.
    pub renamed: Vec<(ResourcePath, ResourcePath)>,
    pub families: Vec<FamilySpec>,
    /// Downstream files with no upstream counterpart.
    pub downstream_only: Vec<ResourcePath>,
}

/// All upstream/downstream correspondences of one checkout.
///
/// Built once and handed to whoever needs it. Every view is computed on first
/// access and then served from cache for the registry's lifetime, even if the
/// files change underneath; build a new registry to pick up changes.
pub struct MappingRegistry {
    spec: RegistrySpec,
    fs: Arc<dyn FileSystem>,
    families: OnceCell<MappingTable>,
    forward: OnceCell<MappingTable>,
    inverse: OnceCell<MappingTable>,
    all_downstream: OnceCell<Vec<ResourcePath>>,
    top_level: OnceCell<Vec<ResourcePath>>,
}

impl MappingRegistry {
    pub fn new(spec: RegistrySpec, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            spec,
            fs,
            families: OnceCell::new(),
            forward: OnceCell::new(),
            inverse: OnceCell::new(),
            all_downstream: OnceCell::new(),
            top_level: OnceCell::new(),
        }
    }

    pub fn with_std_fs(spec: RegistrySpec) -> Self {
        Self::new(spec, Arc::new(StdFs))
    }

    pub fn spec(&self) -> &RegistrySpec {
        &self.spec
    }

    pub fn file_system(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    /// Auto-discovered pairs only: every family, in the order listed.
    pub fn family_mapping(&self) -> Result<&MappingTable> {
        self.families.get_or_try_init(|| {
            tracing::info!(event = "grd_discovery_started", families = self.spec.families.len());
            let mut table = MappingTable::new();
            for fam in &self.spec.families {
                let sub = build_family(self.fs.as_ref(), &fam.upstream, &fam.downstream, &fam.exclude)?;
                table.merge(sub)?;
            }
            tracing::info!(event = "grd_discovery_finished", pairs = table.len());
            Ok(table)
        })
    }

    /// Upstream -> downstream for everything that is generated from upstream:
    /// renamed pairs first, then the families.
    pub fn forward(&self) -> Result<&MappingTable> {
        self.forward.get_or_try_init(|| {
            let mut table = MappingTable::new();
            for (up, down) in &self.spec.renamed {
                table.insert(up.clone(), down.clone())?;
            }
            table.merge(self.family_mapping()?.clone())?;
            Ok(table)
        })
    }

    /// Downstream -> upstream.
    pub fn inverse(&self) -> Result<&MappingTable> {
        self.inverse
            .get_or_try_init(|| self.forward().and_then(MappingTable::inverse))
    }

    pub fn generated_paths(&self) -> Result<Vec<&ResourcePath>> {
        Ok(self.forward()?.downstream_paths().collect())
    }

    pub fn downstream_only_paths(&self) -> &[ResourcePath] {
        &self.spec.downstream_only
    }

    /// Every downstream path regardless of provenance: downstream-only files
    /// first, then the generated ones.
    pub fn all_downstream_paths(&self) -> Result<&[ResourcePath]> {
        self.all_downstream
            .get_or_try_init(|| {
                let forward = self.forward()?;
                let mut out = self.spec.downstream_only.clone();
                out.extend(forward.downstream_paths().cloned());
                Ok(out)
            })
            .map(Vec::as_slice)
    }

    /// The subset of [`Self::all_downstream_paths`] handled per file by
    /// translation tooling.
    pub fn top_level_paths(&self) -> Result<&[ResourcePath]> {
        self.top_level
            .get_or_try_init(|| {
                let all = self.all_downstream_paths()?;
                Ok(all
                    .iter()
                    .filter(|p| p.extension().is_some_and(|e| TOP_LEVEL_EXTS.contains(&e)))
                    .cloned()
                    .collect())
            })
            .map(Vec::as_slice)
    }
}

impl std::fmt::Debug for MappingRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingRegistry")
            .field("spec", &self.spec)
            .field("families_built", &self.families.get().is_some())
            .field("forward_built", &self.forward.get().is_some())
            .finish()
    }
}
