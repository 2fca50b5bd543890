use crate::context::Context;
use grdsync_core::GrdSyncError;
use grdsync_services::SyncOptions;

pub fn run_sync(
    ctx: &Context,
    dry_run: bool,
    format: &str,
    strict: bool,
    allow_missing_downstream: bool,
) -> color_eyre::Result<()> {
    let sync_cfg = ctx.cfg.sync.clone().unwrap_or_default();
    let dry_run = dry_run || sync_cfg.dry_run.unwrap_or(false);
    let strict = strict || sync_cfg.strict.unwrap_or(false);
    tracing::debug!(event = "sync_args", dry_run = dry_run, format = %format, strict = strict);

    let registry = ctx.registry()?;
    let opts = SyncOptions {
        dry_run,
        allow_missing_downstream,
    };
    let report = match grdsync_services::rebase(&registry, opts) {
        Ok(r) => r,
        Err(GrdSyncError::Sync {
            total,
            failures,
            drift,
        }) => {
            for f in &failures {
                crate::ui_err!("{f}");
            }
            if format != "json" {
                super::drift::print_removed_parts(&drift, ctx.use_color);
            }
            color_eyre::eyre::bail!("{} of {total} copy operations failed", failures.len());
        }
        Err(e) => return Err(e.into()),
    };

    if format == "json" {
        serde_json::to_writer(std::io::stdout().lock(), &grdsync_services::sync_summary(&report))?;
    } else {
        super::drift::print_missing(&report.drift);
        if dry_run {
            for p in &report.changed {
                crate::ui_out!("would update {p}");
            }
            crate::ui_ok!(
                "dry run: {} of {} file(s) would change",
                report.changed.len(),
                report.pairs
            );
        } else {
            crate::ui_ok!(
                "rebased {} file(s): {} updated, {} already current",
                report.pairs,
                report.changed.len(),
                report.unchanged
            );
        }
        super::drift::print_removed_parts(&report.drift, ctx.use_color);
    }

    if strict && !report.drift.is_empty() {
        color_eyre::eyre::bail!("drift found in {} document(s)", report.drift.len());
    }
    Ok(())
}
