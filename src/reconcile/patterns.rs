use anyhow::{Context, Result};
use regex::Regex;

// Four-digit year or the undated marker, always captured.
pub const YEAR: &str = r"(\d{4}|n\.d\.)";

// Capitalized surname-like word: letters, apostrophes, hyphens.
pub const SURNAME: &str = r"[A-Z][A-Za-z'’\-]+";

// Whitespace other than the newline that separates joined paragraphs.
pub const INLINE_SPACE: &str = r"[^\S\n]";

pub fn compile(pattern: &str, label: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("failed to compile {label} regex"))
}

pub fn parenthesized_year() -> Result<Regex> {
    compile(&format!(r"\({YEAR}\)"), "parenthesized year")
}

pub fn leading_surname() -> Result<Regex> {
    compile(&format!(r"^({SURNAME}), "), "leading surname")
}
