use std::collections::BTreeSet;

use anyhow::Result;
use regex::Regex;

use super::normalize::CitationKey;
use super::patterns::{INLINE_SPACE, SURNAME, YEAR, compile};

// Cut markers in priority order; the text before the first one found is the
// first-listed author.
const CO_AUTHOR_MARKERS: [&str; 3] = ["&", " and ", "et al."];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MentionScan {
    pub parenthetical: BTreeSet<CitationKey>,
    pub narrative: BTreeSet<CitationKey>,
}

impl MentionScan {
    pub fn keys(&self) -> BTreeSet<CitationKey> {
        self.parenthetical
            .union(&self.narrative)
            .cloned()
            .collect()
    }
}

#[derive(Debug)]
pub struct MentionExtractor {
    parenthetical: Regex,
    narrative: Regex,
}

impl MentionExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // (Smith, 2021), (Smith & Lee, 2020), (World Health Organization, n.d.)
            parenthetical: compile(
                &format!(r"\(([A-Z][^()\n]*?),{INLINE_SPACE}*{YEAR}\)"),
                "parenthetical citation",
            )?,
            // Smith (2021), Jones and Lee (2020), Brown et al. (n.d.)
            narrative: compile(
                &format!(
                    r"\b({SURNAME})(?:{INLINE_SPACE}+(?:and|&){INLINE_SPACE}+{SURNAME}|{INLINE_SPACE}+et{INLINE_SPACE}+al\.)?{INLINE_SPACE}*\({YEAR}\)"
                ),
                "narrative citation",
            )?,
        })
    }

    pub fn scan(&self, text: &str) -> MentionScan {
        let parenthetical = self
            .parenthetical
            .captures_iter(text)
            .filter_map(|captures| {
                let fragment = captures.get(1)?.as_str();
                let year = captures.get(2)?.as_str();
                Some(CitationKey::from_raw(first_author_fragment(fragment), year))
            })
            .collect();

        let narrative = self
            .narrative
            .captures_iter(text)
            .filter_map(|captures| {
                let author = captures.get(1)?.as_str();
                let year = captures.get(2)?.as_str();
                Some(CitationKey::from_raw(author, year))
            })
            .collect();

        MentionScan {
            parenthetical,
            narrative,
        }
    }

    pub fn scan_paragraphs<S: AsRef<str>>(&self, paragraphs: &[S]) -> MentionScan {
        let text = paragraphs
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("\n");
        self.scan(&text)
    }
}

fn first_author_fragment(fragment: &str) -> &str {
    CO_AUTHOR_MARKERS
        .iter()
        .find_map(|marker| fragment.find(marker))
        .map(|index| &fragment[..index])
        .unwrap_or(fragment)
}
