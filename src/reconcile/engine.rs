use std::collections::BTreeSet;

use anyhow::Result;
use tracing::debug;

use super::entry_key::{EntryKeyStrategy, HeuristicKeys};
use super::mentions::MentionExtractor;
use super::normalize::CitationKey;
use super::report::{
    FormatOptions, FormattedDocument, ReconciliationReport, ReferenceEntry, ReferencesSection,
};
use super::segment::EntrySegmenter;

pub const REFERENCES_HEADING: &str = "References";

pub fn find_references_boundary<S: AsRef<str>>(paragraphs: &[S]) -> Option<usize> {
    paragraphs
        .iter()
        .position(|paragraph| paragraph.as_ref().trim().to_lowercase() == "references")
}

pub struct Reconciler {
    mentions: MentionExtractor,
    segmenter: EntrySegmenter,
    keys: Box<dyn EntryKeyStrategy>,
}

impl Reconciler {
    pub fn new() -> Result<Self> {
        Self::with_strategy(Box::new(HeuristicKeys::new()?))
    }

    pub fn with_strategy(keys: Box<dyn EntryKeyStrategy>) -> Result<Self> {
        Ok(Self {
            mentions: MentionExtractor::new()?,
            segmenter: EntrySegmenter::new()?,
            keys,
        })
    }

    pub fn strategy_name(&self) -> &'static str {
        self.keys.name()
    }

    pub fn check<S: AsRef<str>>(&self, paragraphs: &[S]) -> ReconciliationReport {
        let scan = self.mentions.scan_paragraphs(paragraphs);
        let mention_keys = scan.keys();

        let (references_section, entries) = match find_references_boundary(paragraphs) {
            Some(heading_index) => (
                ReferencesSection::Found { heading_index },
                self.reference_entries(&paragraphs[heading_index + 1..]),
            ),
            None => {
                debug!(paragraphs = paragraphs.len(), "no references heading in document");
                (ReferencesSection::Missing, Vec::new())
            }
        };

        let (cited_but_missing, listed_but_uncited) = match references_section {
            ReferencesSection::Found { .. } => {
                let entry_keys = entries
                    .iter()
                    .map(|entry| entry.key.clone())
                    .collect::<BTreeSet<_>>();
                (
                    sorted_difference(&mention_keys, &entry_keys),
                    sorted_difference(&entry_keys, &mention_keys),
                )
            }
            ReferencesSection::Missing => (Vec::new(), Vec::new()),
        };

        debug!(
            mentions = mention_keys.len(),
            entries = entries.len(),
            cited_but_missing = cited_but_missing.len(),
            listed_but_uncited = listed_but_uncited.len(),
            strategy = self.keys.name(),
            "reconciliation pass complete"
        );

        ReconciliationReport {
            references_section,
            mention_count: mention_keys.len(),
            parenthetical_count: scan.parenthetical.len(),
            narrative_count: scan.narrative.len(),
            entry_count: entries.len(),
            mentions: mention_keys.into_iter().collect(),
            cited_but_missing,
            listed_but_uncited,
            entries,
        }
    }

    /// Rebuilds the document with a single `References` heading followed by
    /// one paragraph per reconstructed entry, then checks the rebuilt text.
    /// A heading is appended when the input has none.
    pub fn check_and_format<S: AsRef<str>>(
        &self,
        paragraphs: &[S],
        options: FormatOptions,
    ) -> FormattedDocument {
        let (source_references, body, mut entries) = match find_references_boundary(paragraphs) {
            Some(heading_index) => (
                ReferencesSection::Found { heading_index },
                &paragraphs[..heading_index],
                self.reference_entries(&paragraphs[heading_index + 1..]),
            ),
            None => (ReferencesSection::Missing, paragraphs, Vec::new()),
        };

        if options.alphabetize {
            entries.sort_by(|left, right| left.key.cmp(&right.key));
        }

        let mut rebuilt = body
            .iter()
            .map(|paragraph| paragraph.as_ref().to_string())
            .collect::<Vec<_>>();
        rebuilt.push(REFERENCES_HEADING.to_string());
        rebuilt.extend(entries.into_iter().map(|entry| entry.text));

        let report = self.check(&rebuilt);
        FormattedDocument {
            source_references,
            paragraphs: rebuilt,
            report,
        }
    }

    fn reference_entries<S: AsRef<str>>(&self, tail: &[S]) -> Vec<ReferenceEntry> {
        self.segmenter
            .segment(tail)
            .into_iter()
            .map(|text| {
                let key = self.keys.entry_key(&text);
                ReferenceEntry { text, key }
            })
            .collect()
    }
}

fn sorted_difference(
    left: &BTreeSet<CitationKey>,
    right: &BTreeSet<CitationKey>,
) -> Vec<CitationKey> {
    left.difference(right).cloned().collect()
}
