use serde::Serialize;

use crate::reconcile::ReconciliationReport;

pub const RUN_MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    pub path: String,
    pub sha256: String,
    pub paragraph_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormatOutputInfo {
    pub path: String,
    pub paragraph_count: usize,
    pub alphabetized: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub generated_at: String,
    pub command: String,
    pub key_strategy: String,
    pub source: SourceInfo,
    pub output: Option<FormatOutputInfo>,
    pub report: ReconciliationReport,
}
