mod engine;
mod entry_key;
mod mentions;
mod normalize;
mod patterns;
mod report;
mod segment;


pub(crate) use engine::{REFERENCES_HEADING, Reconciler};
pub(crate) use entry_key::StrictKeys;
pub(crate) use normalize::CitationKey;
pub(crate) use report::{FormatOptions, ReconciliationReport, ReferencesSection};
