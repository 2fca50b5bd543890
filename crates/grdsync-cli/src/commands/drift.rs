use crate::context::Context;
use grdsync_services::DriftReport;
use owo_colors::OwoColorize;

pub fn run_drift(
    ctx: &Context,
    format: &str,
    strict: bool,
    allow_missing: bool,
) -> color_eyre::Result<()> {
    tracing::debug!(event = "drift_args", format = %format, strict = strict, allow_missing = allow_missing);
    let registry = ctx.registry()?;
    let fs = registry.file_system();
    let table = registry.family_mapping()?;
    let report = if allow_missing {
        grdsync_services::removed_parts_allowing_missing(fs, table)?
    } else {
        grdsync_services::removed_parts(fs, table)?
    };

    if format == "json" {
        serde_json::to_writer(std::io::stdout().lock(), &grdsync_services::drift_output(&report))?;
    } else {
        print_missing(&report);
        if report.is_empty() {
            crate::ui_ok!("no drift: every downstream part is still declared upstream");
        } else {
            print_removed_parts(&report, ctx.use_color);
        }
    }

    if strict && !report.is_empty() {
        color_eyre::eyre::bail!("drift found in {} document(s)", report.len());
    }
    Ok(())
}

/// Downstream documents that were not there to compare.
pub fn print_missing(report: &DriftReport) {
    for p in report.missing() {
        crate::ui_warn!("not checked, does not exist yet: {p}");
    }
}

/// Banner listing, per downstream document, the parts upstream dropped.
pub fn print_removed_parts(report: &DriftReport, use_color: bool) {
    if report.is_empty() {
        return;
    }
    let rule = "*".repeat(74);
    crate::ui_out!("\n{rule}");
    crate::ui_out!("The following GRDP files are no longer in the corresponding upstream GRDs:\n");
    for entry in report {
        if use_color {
            crate::ui_out!("  From {}:", entry.document.to_string().blue());
        } else {
            crate::ui_out!("  From {}:", entry.document);
        }
        for part in &entry.orphaned {
            if use_color {
                crate::ui_out!("    - {}", part.yellow());
            } else {
                crate::ui_out!("    - {part}");
            }
        }
    }
}
