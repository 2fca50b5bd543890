use grdsync_config::MappingCfg;
use grdsync_core::{ResourcePath, Result};
use std::path::Path;

use crate::registry::{FamilySpec, RegistrySpec};

/// Turn configured (checkout-relative) tables into a [`RegistrySpec`].
/// `src_dir` must be absolute.
pub fn registry_spec(src_dir: &Path, mapping: &MappingCfg) -> Result<RegistrySpec> {
    let resolve = |rel: &str| ResourcePath::resolve(src_dir, rel);

    let renamed = mapping
        .renamed
        .iter()
        .flatten()
        .map(|p| -> Result<_> { Ok((resolve(p.upstream.as_str())?, resolve(p.downstream.as_str())?)) })
        .collect::<Result<Vec<_>>>()?;

    let families = mapping
        .families
        .iter()
        .flatten()
        .map(|f| -> Result<_> {
            Ok(FamilySpec {
                upstream: resolve(f.upstream.as_str())?,
                downstream: resolve(f.downstream.as_str())?,
                exclude: f.exclude.iter().cloned().collect(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let downstream_only = mapping
        .downstream_only
        .iter()
        .flatten()
        .map(|p| resolve(p.as_str()))
        .collect::<Result<Vec<_>>>()?;

    Ok(RegistrySpec {
        renamed,
        families,
        downstream_only,
    })
}
