use anyhow::Result;
use regex::Regex;

use super::patterns::{leading_surname, parenthesized_year};

// Organization-authored entries must show their year this early to count as
// the start of a new entry.
const YEAR_WINDOW_CHARS: usize = 80;

/// Groups the paragraphs of a references section into logical entries,
/// re-joining lines that a word processor wrapped into separate paragraphs.
///
/// A paragraph starts a new entry when it opens with `Surname, ` or when it
/// opens with an uppercase letter and has a parenthesized year within its
/// first 80 characters. Anything else continues the current entry, so an
/// entry whose first line fits neither shape is merged into its predecessor.
#[derive(Debug)]
pub struct EntrySegmenter {
    leading_surname: Regex,
    year_token: Regex,
}

impl EntrySegmenter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            leading_surname: leading_surname()?,
            year_token: parenthesized_year()?,
        })
    }

    /// Leading and trailing whitespace is dropped from every paragraph before
    /// the start-of-entry tests and before it is joined into an entry.
    pub fn segment<S: AsRef<str>>(&self, paragraphs: &[S]) -> Vec<String> {
        let mut entries = Vec::<String>::new();
        let mut current = String::new();

        for paragraph in paragraphs {
            let line = paragraph.as_ref().trim();
            if line.is_empty() {
                continue;
            }

            if self.starts_entry(line) {
                if !current.is_empty() {
                    entries.push(std::mem::take(&mut current));
                }
                current.push_str(line);
                continue;
            }

            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(line);
        }

        if !current.is_empty() {
            entries.push(current);
        }

        entries
    }

    fn starts_entry(&self, line: &str) -> bool {
        if self.leading_surname.is_match(line) {
            return true;
        }

        let starts_uppercase = line
            .chars()
            .next()
            .map(|value| value.is_uppercase())
            .unwrap_or(false);
        if !starts_uppercase {
            return false;
        }

        let window_end = line
            .char_indices()
            .nth(YEAR_WINDOW_CHARS)
            .map(|(index, _)| index)
            .unwrap_or(line.len());
        self.year_token.is_match(&line[..window_end])
    }
}
