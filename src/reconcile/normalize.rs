use std::fmt;

use serde::Serialize;

pub const UNDATED: &str = "n.d.";
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// First-author surname token plus year token; the unit of identity when
/// matching an in-text mention to a reference entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CitationKey {
    pub author: String,
    pub year: String,
}

impl CitationKey {
    pub fn from_raw(raw_author: &str, raw_year: &str) -> Self {
        Self {
            author: normalize_author_token(raw_author),
            year: normalize_year(raw_year),
        }
    }

    pub fn unresolved() -> Self {
        Self {
            author: UNKNOWN_AUTHOR.to_string(),
            year: UNDATED.to_string(),
        }
    }
}

impl fmt::Display for CitationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.author, self.year)
    }
}

pub fn normalize_year(raw: &str) -> String {
    let value = raw.trim().to_lowercase();
    if value == UNDATED {
        return UNDATED.to_string();
    }

    if value.len() == 4 && value.bytes().all(|byte| byte.is_ascii_digit()) {
        return value;
    }

    UNDATED.to_string()
}

/// Lowercased first word of `raw` after dropping everything except ASCII
/// letters, apostrophes, hyphens, and spaces. Accented letters are dropped
/// too (`García` becomes `garca`); mentions and entries pass through the same
/// filter, so they still agree.
pub fn normalize_author_token(raw: &str) -> String {
    let kept = raw
        .trim()
        .chars()
        .filter(|ch| ch.is_ascii_alphabetic() || matches!(ch, '\'' | '\u{2019}' | '-' | ' '))
        .collect::<String>();

    kept.split_whitespace()
        .next()
        .map(str::to_lowercase)
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_year_keeps_four_digit_years() {
        for year in ["0000", "1999", "2021", "9999"] {
            assert_eq!(normalize_year(year), year);
        }
        assert_eq!(normalize_year("  2020 "), "2020");
    }

    #[test]
    fn normalize_year_falls_back_to_undated() {
        for raw in ["", "   ", "20", "20201", "2020a", "ab12", "n.d", "nd", "2O20"] {
            assert_eq!(normalize_year(raw), UNDATED, "input {raw:?}");
        }
        assert_eq!(normalize_year("N.D."), UNDATED);
        assert_eq!(normalize_year(" n.d. "), UNDATED);
    }

    #[test]
    fn normalize_author_token_keeps_first_word_lowercased() {
        assert_eq!(normalize_author_token("Smith"), "smith");
        assert_eq!(normalize_author_token("Smith, J."), "smith");
        assert_eq!(normalize_author_token("World Health Organization"), "world");
        assert_eq!(normalize_author_token("  O'Neil-Jones "), "o'neil-jones");
        assert_eq!(normalize_author_token("O\u{2019}Brien"), "o\u{2019}brien");
    }

    #[test]
    fn normalize_author_token_strips_digits_and_punctuation() {
        assert_eq!(normalize_author_token("3M Company"), "m");
        assert_eq!(normalize_author_token("(Smith)."), "smith");
        assert_eq!(normalize_author_token("Smith\tJones"), "smithjones");
    }

    #[test]
    fn normalize_author_token_drops_non_ascii_letters() {
        assert_eq!(normalize_author_token("García"), "garca");
        assert_eq!(normalize_author_token("Müller-Lüdenscheidt"), "mller-ldenscheidt");
        assert_eq!(
            CitationKey::from_raw("García", "2020"),
            CitationKey::from_raw("García, M.", "2020")
        );
    }

    #[test]
    fn normalize_author_token_never_returns_empty() {
        for raw in ["", "   ", "1234", "., ()", "\u{4e2d}\u{6587}"] {
            let token = normalize_author_token(raw);
            assert!(!token.is_empty());
            assert_eq!(token, UNKNOWN_AUTHOR, "input {raw:?}");
        }
    }

    #[test]
    fn citation_keys_order_by_author_then_year() {
        let mut keys = vec![
            CitationKey::from_raw("Lee", "2019"),
            CitationKey::from_raw("Brown", "n.d."),
            CitationKey::from_raw("Brown", "2020"),
        ];
        keys.sort();

        let rendered = keys.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(rendered, vec!["brown, 2020", "brown, n.d.", "lee, 2019"]);
    }
}
