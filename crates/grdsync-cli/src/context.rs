use color_eyre::eyre::{Result, WrapErr};
use grdsync_config::GrdSyncConfig;
use grdsync_services::{registry_spec, MappingRegistry};
use std::path::{Path, PathBuf};

/// Per-invocation settings resolved from flags and grdsync.toml.
pub struct Context {
    pub cfg: GrdSyncConfig,
    /// Absolute checkout root.
    pub src_dir: PathBuf,
    pub use_color: bool,
}

impl Context {
    pub fn load(src_dir: Option<PathBuf>, config: Option<PathBuf>, use_color: bool) -> Result<Self> {
        let cfg = match config.as_deref() {
            Some(path) => grdsync_config::load_config_from(path)?,
            None => grdsync_config::load_config().unwrap_or_default(),
        };
        let src_dir = src_dir
            .or_else(|| cfg.src_dir.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        let src_dir = absolute(&src_dir)?;
        Ok(Self {
            cfg,
            src_dir,
            use_color,
        })
    }

    /// Fresh registry over the effective mapping tables.
    pub fn registry(&self) -> Result<MappingRegistry> {
        let spec = registry_spec(&self.src_dir, &self.cfg.effective_mapping())
            .wrap_err("cannot resolve mapping tables")?;
        Ok(MappingRegistry::with_std_fs(spec))
    }

    pub fn resolve(&self, p: &Path) -> PathBuf {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.src_dir.join(p)
        }
    }
}

/// `p` joined onto the working directory unless already absolute.
pub fn absolute(p: &Path) -> Result<PathBuf> {
    if p.is_absolute() {
        return Ok(p.to_path_buf());
    }
    let cwd = std::env::current_dir().wrap_err("cannot determine current directory")?;
    Ok(cwd.join(p))
}
