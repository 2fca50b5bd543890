use crate::context::{absolute, Context};
use grdsync_core::StdFs;
use grdsync_parsers::DEFAULT_GREASELION_BASE;
use std::path::{Path, PathBuf};

pub fn run_greaselion(
    ctx: &Context,
    extension_path: Option<PathBuf>,
    format: &str,
) -> color_eyre::Result<()> {
    // Flag and default are relative to the working directory; the config
    // value follows the rest of grdsync.toml and is relative to src_dir.
    let configured = ctx
        .cfg
        .greaselion
        .as_ref()
        .and_then(|g| g.extension_path.as_ref())
        .map(|p| ctx.resolve(Path::new(p)));
    let base = match (extension_path, configured) {
        (Some(p), _) => absolute(&p)?,
        (None, Some(p)) => p,
        (None, None) => absolute(Path::new(DEFAULT_GREASELION_BASE))?,
    };
    tracing::debug!(event = "greaselion_args", base = %base.display(), format = %format);

    let paths = grdsync_parsers::read_greaselion_message_paths(&StdFs, &base)?;

    if format == "json" {
        let out = grdsync_domain::PathListOutput {
            schema_version: grdsync_domain::SCHEMA_VERSION,
            kind: "greaselion".to_string(),
            paths: paths.iter().map(|p| p.display().to_string()).collect(),
        };
        serde_json::to_writer(std::io::stdout().lock(), &out)?;
        return Ok(());
    }
    if paths.is_empty() {
        crate::ui_warn!("no Greaselion rule ships messages");
    }
    for p in &paths {
        crate::ui_out!("{}", p.display());
    }
    Ok(())
}
