use serde::Serialize;

use super::normalize::CitationKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReferencesSection {
    Found { heading_index: usize },
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceEntry {
    pub text: String,
    pub key: CitationKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationReport {
    pub references_section: ReferencesSection,
    pub mention_count: usize,
    pub parenthetical_count: usize,
    pub narrative_count: usize,
    pub entry_count: usize,
    pub mentions: Vec<CitationKey>,
    pub cited_but_missing: Vec<CitationKey>,
    pub listed_but_uncited: Vec<CitationKey>,
    pub entries: Vec<ReferenceEntry>,
}

impl ReconciliationReport {
    pub fn references_found(&self) -> bool {
        matches!(self.references_section, ReferencesSection::Found { .. })
    }

    pub fn is_consistent(&self) -> bool {
        self.references_found()
            && self.cited_but_missing.is_empty()
            && self.listed_but_uncited.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedDocument {
    pub source_references: ReferencesSection,
    pub paragraphs: Vec<String>,
    pub report: ReconciliationReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub alphabetize: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self { alphabetize: true }
    }
}
