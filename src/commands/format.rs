use anyhow::Result;
use tracing::info;

use crate::cli::FormatArgs;
use crate::commands::output::write_report;
use crate::commands::source::{
    build_reconciler, enforce_references_section, load_source, write_run_manifest,
};
use crate::model::FormatOutputInfo;
use crate::reconcile::{FormatOptions, REFERENCES_HEADING, ReferencesSection};
use crate::util::write_paragraphs;

pub fn run(args: FormatArgs) -> Result<bool> {
    let source = load_source(args.source.input.as_deref())?;
    let reconciler = build_reconciler(args.source.key_strategy)?;
    let options = FormatOptions {
        alphabetize: !args.no_alphabetize,
    };

    let formatted = reconciler.check_and_format(&source.paragraphs, options);
    enforce_references_section(formatted.source_references, args.source.require_references)?;
    if !matches!(formatted.source_references, ReferencesSection::Found { .. }) {
        info!(heading = REFERENCES_HEADING, "appended references heading");
    }

    write_paragraphs(&args.output, &formatted.paragraphs)?;

    info!(
        path = %args.output.display(),
        paragraphs = formatted.paragraphs.len(),
        entries = formatted.report.entry_count,
        alphabetized = options.alphabetize,
        "wrote formatted document"
    );

    let report = &formatted.report;
    info!(
        mentions = report.mention_count,
        cited_but_missing = report.cited_but_missing.len(),
        listed_but_uncited = report.listed_but_uncited.len(),
        "format completed"
    );

    if let Some(report_path) = args.source.report_path.as_deref() {
        let output = FormatOutputInfo {
            path: args.output.display().to_string(),
            paragraph_count: formatted.paragraphs.len(),
            alphabetized: options.alphabetize,
        };
        write_run_manifest(report_path, "format", &args.source, &source, Some(output), report)?;
    }

    write_report(report, args.source.json)?;
    Ok(report.is_consistent())
}
