use crate::context::Context;

pub fn run_map(ctx: &Context, inverse: bool, format: &str) -> color_eyre::Result<()> {
    tracing::debug!(event = "map_args", inverse = inverse, format = %format);
    let registry = ctx.registry()?;
    let table = if inverse {
        registry.inverse()?
    } else {
        registry.forward()?
    };

    if format == "json" {
        let out = grdsync_services::mapping_output(table, inverse);
        serde_json::to_writer(std::io::stdout().lock(), &out)?;
        return Ok(());
    }
    for m in table {
        crate::ui_out!("{} -> {}", m.upstream, m.downstream);
    }
    Ok(())
}
