use crate::context::Context;
use grdsync_core::ResourcePath;

pub fn run_paths(ctx: &Context, kind: &str, format: &str) -> color_eyre::Result<()> {
    tracing::debug!(event = "paths_args", kind = %kind, format = %format);
    let registry = ctx.registry()?;

    let paths: Vec<&ResourcePath> = match kind {
        "top-level" => registry.top_level_paths()?.iter().collect(),
        "generated" => registry.generated_paths()?,
        "downstream-only" => registry.downstream_only_paths().iter().collect(),
        _ => registry.all_downstream_paths()?.iter().collect(),
    };

    if format == "json" {
        let out = grdsync_services::path_list_output(kind, paths);
        serde_json::to_writer(std::io::stdout().lock(), &out)?;
        return Ok(());
    }
    for p in paths {
        crate::ui_out!("{p}");
    }
    Ok(())
}
