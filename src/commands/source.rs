use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::{info, warn};

use crate::cli::{KeyStrategy, SourceArgs};
use crate::model::{FormatOutputInfo, RUN_MANIFEST_VERSION, RunManifest, SourceInfo};
use crate::reconcile::{Reconciler, ReconciliationReport, ReferencesSection, StrictKeys};
use crate::util::{now_utc_string, sha256_hex, split_paragraphs, utc_compact_string, write_json_pretty};

const STDIN_LABEL: &str = "<stdin>";

#[derive(Debug)]
pub(super) struct LoadedSource {
    pub label: String,
    pub sha256: String,
    pub paragraphs: Vec<String>,
}

impl LoadedSource {
    pub fn info(&self) -> SourceInfo {
        SourceInfo {
            path: self.label.clone(),
            sha256: self.sha256.clone(),
            paragraph_count: self.paragraphs.len(),
        }
    }
}

pub(super) fn load_source(input: Option<&Path>) -> Result<LoadedSource> {
    let (label, raw) = match input {
        Some(path) => {
            let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
            (path.display().to_string(), raw)
        }
        None => {
            let mut raw = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut raw)
                .context("failed to read document from stdin")?;
            (STDIN_LABEL.to_string(), raw)
        }
    };

    let text = String::from_utf8(raw)
        .with_context(|| format!("document is not valid UTF-8: {label}"))?;
    let sha256 = sha256_hex(text.as_bytes());
    let paragraphs = split_paragraphs(&text);

    info!(source = %label, paragraphs = paragraphs.len(), "loaded document");

    Ok(LoadedSource {
        label,
        sha256,
        paragraphs,
    })
}

pub(super) fn build_reconciler(strategy: KeyStrategy) -> Result<Reconciler> {
    let reconciler = match strategy {
        KeyStrategy::Heuristic => Reconciler::new(),
        KeyStrategy::Strict => Reconciler::with_strategy(Box::new(StrictKeys::new()?)),
    };

    reconciler.context("failed to build reconciler")
}

pub(super) fn enforce_references_section(
    section: ReferencesSection,
    require_references: bool,
) -> Result<()> {
    match section {
        ReferencesSection::Found { heading_index } => {
            info!(heading_index, "references section located");
        }
        ReferencesSection::Missing if require_references => {
            bail!("no paragraph reading \"References\" was found in the document");
        }
        ReferencesSection::Missing => {
            warn!("no references heading found in source document");
        }
    }

    Ok(())
}

pub(super) fn write_run_manifest(
    path: &Path,
    command: &str,
    args: &SourceArgs,
    source: &LoadedSource,
    output: Option<FormatOutputInfo>,
    report: &ReconciliationReport,
) -> Result<()> {
    let manifest = build_run_manifest(command, args.key_strategy, source, output, report);

    write_json_pretty(path, &manifest)?;
    info!(path = %path.display(), run_id = %manifest.run_id, "wrote run manifest");

    Ok(())
}

fn build_run_manifest(
    command: &str,
    key_strategy: KeyStrategy,
    source: &LoadedSource,
    output: Option<FormatOutputInfo>,
    report: &ReconciliationReport,
) -> RunManifest {
    RunManifest {
        manifest_version: RUN_MANIFEST_VERSION,
        run_id: format!("{command}-{}", utc_compact_string(Utc::now())),
        generated_at: now_utc_string(),
        command: command.to_string(),
        key_strategy: key_strategy.as_str().to_string(),
        source: source.info(),
        output,
        report: report.clone(),
    }
}
