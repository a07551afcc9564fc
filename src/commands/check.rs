use anyhow::Result;
use tracing::info;

use crate::cli::CheckArgs;
use crate::commands::output::write_report;
use crate::commands::source::{
    build_reconciler, enforce_references_section, load_source, write_run_manifest,
};

/// Returns whether the reconciliation report is consistent.
pub fn run(args: CheckArgs) -> Result<bool> {
    let source = load_source(args.source.input.as_deref())?;
    let reconciler = build_reconciler(args.source.key_strategy)?;

    info!(
        source = %source.label,
        strategy = reconciler.strategy_name(),
        "checking citations against references"
    );

    let report = reconciler.check(&source.paragraphs);
    enforce_references_section(report.references_section, args.source.require_references)?;

    info!(
        mentions = report.mention_count,
        entries = report.entry_count,
        cited_but_missing = report.cited_but_missing.len(),
        listed_but_uncited = report.listed_but_uncited.len(),
        consistent = report.is_consistent(),
        "check completed"
    );

    if let Some(report_path) = args.source.report_path.as_deref() {
        write_run_manifest(report_path, "check", &args.source, &source, None, &report)?;
    }

    write_report(&report, args.source.json)?;
    Ok(report.is_consistent())
}
