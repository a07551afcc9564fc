use anyhow::Result;
use regex::Regex;

use super::normalize::{CitationKey, UNDATED, normalize_author_token, normalize_year};
use super::patterns::{SURNAME, YEAR, compile, leading_surname, parenthesized_year};

/// Produces the citation key of one reconstructed reference entry.
pub trait EntryKeyStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn entry_key(&self, entry: &str) -> CitationKey;
}

/// First parenthesized year anywhere in the entry; author from a leading
/// `Surname, ` or, failing that, from everything before the first `(`.
#[derive(Debug)]
pub struct HeuristicKeys {
    leading_surname: Regex,
    year_token: Regex,
}

impl HeuristicKeys {
    pub fn new() -> Result<Self> {
        Ok(Self {
            leading_surname: leading_surname()?,
            year_token: parenthesized_year()?,
        })
    }
}

impl EntryKeyStrategy for HeuristicKeys {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn entry_key(&self, entry: &str) -> CitationKey {
        let year = self
            .year_token
            .captures(entry)
            .and_then(|captures| captures.get(1))
            .map(|value| normalize_year(value.as_str()))
            .unwrap_or_else(|| UNDATED.to_string());

        let author = match self
            .leading_surname
            .captures(entry)
            .and_then(|captures| captures.get(1))
        {
            Some(surname) => normalize_author_token(surname.as_str()),
            None => {
                let before_paren = entry.split('(').next().unwrap_or_default();
                normalize_author_token(before_paren)
            }
        };

        CitationKey { author, year }
    }
}

/// Accepts only an APA-shaped opening where the year parenthetical directly
/// follows the author block and ends with a period. Entries of any other
/// shape resolve to the `unknown`/`n.d.` key instead of a guess.
#[derive(Debug)]
pub struct StrictKeys {
    person: Regex,
    organization: Regex,
}

impl StrictKeys {
    pub fn new() -> Result<Self> {
        Ok(Self {
            person: compile(
                &format!(
                    r"^({SURNAME}), (?:[A-Z]\.(?:-[A-Z]\.)?[\s,]*|&\s*|{SURNAME},\s*)*\({YEAR}\)\."
                ),
                "strict person-author entry",
            )?,
            organization: compile(
                &format!(r"^([A-Z][^(),]*?)\.?\s\({YEAR}\)\."),
                "strict organization-author entry",
            )?,
        })
    }
}

impl EntryKeyStrategy for StrictKeys {
    fn name(&self) -> &'static str {
        "strict"
    }

    fn entry_key(&self, entry: &str) -> CitationKey {
        let entry = entry.trim_start();
        self.person
            .captures(entry)
            .or_else(|| self.organization.captures(entry))
            .and_then(|captures| {
                let author = captures.get(1)?.as_str();
                let year = captures.get(2)?.as_str();
                Some(CitationKey::from_raw(author, year))
            })
            .unwrap_or_else(CitationKey::unresolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(author: &str, year: &str) -> CitationKey {
        CitationKey::from_raw(author, year)
    }

    fn heuristic() -> HeuristicKeys {
        HeuristicKeys::new().expect("heuristic patterns compile")
    }

    fn strict() -> StrictKeys {
        StrictKeys::new().expect("strict patterns compile")
    }

    #[test]
    fn heuristic_reads_surname_and_first_year() {
        let strategy = heuristic();
        assert_eq!(
            strategy.entry_key("Smith, J. (2021). Title one. Journal."),
            key("smith", "2021")
        );
        assert_eq!(
            strategy.entry_key("Lee, K., & Park, S. (2019). Title (2nd ed.). Publisher (2020)."),
            key("lee", "2019")
        );
    }

    #[test]
    fn heuristic_falls_back_to_text_before_first_parenthesis() {
        let strategy = heuristic();
        assert_eq!(
            strategy.entry_key("World Health Organization (2019). Global report."),
            key("world", "2019")
        );
        assert_eq!(
            strategy.entry_key("van der Berg, P. (2018). Title."),
            key("van", "2018")
        );
    }

    #[test]
    fn heuristic_defaults_missing_parts_to_sentinels() {
        let strategy = heuristic();
        assert_eq!(strategy.entry_key("Smith, J. Untitled manuscript."), key("smith", "n.d."));
        assert_eq!(strategy.entry_key("(2020). Anonymous pamphlet."), key("unknown", "2020"));
        assert_eq!(strategy.entry_key(""), CitationKey::unresolved());
        assert_eq!(strategy.entry_key("Brown, A. (in press)."), key("brown", "n.d."));
    }

    #[test]
    fn strict_accepts_apa_shaped_openings() {
        let strategy = strict();
        assert_eq!(
            strategy.entry_key("Smith, J. A., & Lee, K. (2021). Title. Journal."),
            key("smith", "2021")
        );
        assert_eq!(
            strategy.entry_key("American Psychological Association. (n.d.). Style guide."),
            key("american", "n.d.")
        );
        assert_eq!(
            strategy.entry_key("World Health Organization (2019). Global report."),
            key("world", "2019")
        );
    }

    #[test]
    fn strict_rejects_entries_the_heuristic_would_guess() {
        let strategy = strict();
        for entry in [
            "Smith, J. Untitled manuscript (2021).",
            "Smith, J. (Ed.). (2021). Edited volume.",
            "van der Berg, P. (2018). Title.",
            "Brown, A. (2020) Title without period.",
            "",
        ] {
            assert_eq!(strategy.entry_key(entry), CitationKey::unresolved(), "entry {entry:?}");
        }
    }

    #[test]
    fn strategies_report_their_names() {
        assert_eq!(heuristic().name(), "heuristic");
        assert_eq!(strict().name(), "strict");
    }
}
