use serde::Deserialize;
use std::path::Path;

mod defaults;

pub use defaults::{default_mapping, CHROMEOS_STRINGS_PART};

pub const CONFIG_FILE: &str = "grdsync.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GrdSyncConfig {
    /// Checkout root that every relative path below is resolved against.
    pub src_dir: Option<String>,
    pub mapping: Option<MappingCfg>,
    pub sync: Option<SyncCfg>,
    pub greaselion: Option<GreaselionCfg>,
}

/// Mapping tables. Any list left out falls back to the built-in one.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct MappingCfg {
    /// Top-level documents whose downstream name differs from upstream.
    pub renamed: Option<Vec<PairCfg>>,
    /// Root documents whose parts are discovered recursively.
    pub families: Option<Vec<FamilyCfg>>,
    /// Downstream documents with no upstream counterpart.
    pub downstream_only: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PairCfg {
    pub upstream: String,
    pub downstream: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FamilyCfg {
    pub upstream: String,
    pub downstream: String,
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncCfg {
    pub dry_run: Option<bool>,
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GreaselionCfg {
    pub extension_path: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Search order: CWD/grdsync.toml, then $CONFIG_DIR/grdsync/grdsync.toml.
/// Earlier files win field by field. Unreadable or invalid files in the
/// search path are skipped with a warning.
pub fn load_config() -> Result<GrdSyncConfig, ConfigError> {
    let mut merged = GrdSyncConfig::default();
    let mut candidates = Vec::new();
    if let Ok(p) = std::env::current_dir() {
        candidates.push(p.join(CONFIG_FILE));
    }
    if let Some(base) = dirs::config_dir() {
        candidates.push(base.join("grdsync").join(CONFIG_FILE));
    }
    for path in candidates {
        if !path.is_file() {
            continue;
        }
        match load_config_from(&path) {
            Ok(cfg) => {
                tracing::debug!(event = "config_loaded", path = %path.display());
                merged = merge(merged, cfg);
            }
            Err(e) => tracing::warn!(event = "config_skipped", error = %e),
        }
    }
    Ok(merged)
}

/// Load exactly one file. Errors are returned, not skipped.
pub fn load_config_from(path: &Path) -> Result<GrdSyncConfig, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str::<GrdSyncConfig>(&s).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn merge(mut a: GrdSyncConfig, b: GrdSyncConfig) -> GrdSyncConfig {
    if a.src_dir.is_none() {
        a.src_dir = b.src_dir;
    }
    a.mapping = merge_opt(a.mapping, b.mapping, merge_mapping);
    a.sync = merge_opt(a.sync, b.sync, merge_sync);
    a.greaselion = merge_opt(a.greaselion, b.greaselion, merge_greaselion);
    a
}

fn merge_opt<T>(a: Option<T>, b: Option<T>, f: fn(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (None, Some(b)) => Some(b),
        (Some(a), None) => Some(a),
        (None, None) => None,
    }
}

fn merge_mapping(mut a: MappingCfg, b: MappingCfg) -> MappingCfg {
    if a.renamed.is_none() {
        a.renamed = b.renamed;
    }
    if a.families.is_none() {
        a.families = b.families;
    }
    if a.downstream_only.is_none() {
        a.downstream_only = b.downstream_only;
    }
    a
}

fn merge_sync(mut a: SyncCfg, b: SyncCfg) -> SyncCfg {
    if a.dry_run.is_none() {
        a.dry_run = b.dry_run;
    }
    if a.strict.is_none() {
        a.strict = b.strict;
    }
    a
}

fn merge_greaselion(mut a: GreaselionCfg, b: GreaselionCfg) -> GreaselionCfg {
    if a.extension_path.is_none() {
        a.extension_path = b.extension_path;
    }
    a
}

impl GrdSyncConfig {
    /// Mapping tables with built-in defaults filled in for anything the
    /// config leaves out.
    pub fn effective_mapping(&self) -> MappingCfg {
        let defaults = default_mapping();
        match self.mapping.clone() {
            Some(m) => merge_mapping(m, defaults),
            None => defaults,
        }
    }
}
