use crate::context::Context;
use grdsync_core::StdFs;

pub fn run_parts(ctx: &Context, file: std::path::PathBuf, format: &str) -> color_eyre::Result<()> {
    let file = ctx.resolve(&file);
    tracing::debug!(event = "parts_args", file = %file.display(), format = %format);

    let parts = grdsync_parsers::read_part_files(&StdFs, &file)?;
    if format == "json" {
        serde_json::to_writer(std::io::stdout().lock(), &parts)?;
        return Ok(());
    }
    for p in &parts {
        crate::ui_out!("{p}");
    }
    Ok(())
}
