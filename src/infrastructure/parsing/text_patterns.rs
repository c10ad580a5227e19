//! Free-text pattern cascades shared across eras.
//!
//! Each cascade is an ordered pattern list, most specific first; the first
//! match wins. Keeping the lists here makes the precedence testable without
//! any HTML fixtures.

use once_cell::sync::Lazy;
use regex::Regex;

/// Marker appended to truncated summaries.
pub const ELLIPSIS: &str = "...";

/// Maximum summary length in characters, before the ellipsis marker.
pub const SUMMARY_MAX_CHARS: usize = 300;

/// Maximum content-snippet length in characters.
pub const SNIPPET_MAX_CHARS: usize = 200;

/// Project/bill number patterns, most specific first: `05405/2015-PE`
/// style, then the bare `NNNNN/YYYY`, then `PL <n>`, then `PROYECTO <n>`.
pub static PROJECT_NUMBER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(\d{4,5}/\d{4}-(?:PE|CR))",
        r"(\d{4,5}/\d{4})",
        r"(?i)PL\s*(\d+)",
        r"(?i)PROYECTO\s+(\d+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

static LAW_NUMBER_FREE_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{4,5}/\d{4}-[A-Z]+)").expect("static pattern"));

static LABELED_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Título:\s*([^\n]+)").expect("static pattern"));
static LEY_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)LEY\s+[^.\n]+").expect("static pattern"));
static PROPONE_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)PROPONE\s+[^.\n]+").expect("static pattern"));
static OBJETO_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)OBJETO:\s*([^.\n]+)").expect("static pattern"));

/// Status keywords for the legacy free-text fallback, first match wins.
pub const STATUS_KEYWORDS: &[&str] = &["Al Archivo", "En comisión", "Presentado", "Aprobado"];

/// Status keywords recognized inside a `Seguimiento` tracking cell.
pub const SEGUIMIENTO_STATUS_KEYWORDS: &[&str] = &[
    "Al Archivo",
    "En comisión",
    "Presentado",
    "Aprobado",
    "Decretado",
];

/// First project-number pattern matching the text, if any.
pub fn project_number(text: &str) -> Option<String> {
    for pattern in PROJECT_NUMBER_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            let matched = captures
                .get(1)
                .or_else(|| captures.get(0))
                .map(|m| m.as_str().to_string());
            if matched.is_some() {
                return matched;
            }
        }
    }
    None
}

/// The `NNNNN/YYYY-LETTERS` law number anywhere in the page text.
pub fn law_number_free_text(text: &str) -> Option<String> {
    LAW_NUMBER_FREE_TEXT
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Title from an explicit `Título:` label line.
pub fn labeled_title(text: &str) -> Option<String> {
    LABELED_TITLE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| t.chars().count() > 10)
}

/// Title from a `LEY ...` or `PROPONE ...` sentence.
pub fn sentence_title(text: &str) -> Option<String> {
    for pattern in [&*LEY_TITLE, &*PROPONE_TITLE] {
        if let Some(m) = pattern.find(text) {
            let title = m.as_str().trim().to_string();
            if title.chars().count() > 10 {
                return Some(title);
            }
        }
    }
    None
}

/// Title from an `OBJETO:` clause.
pub fn objeto_title(text: &str) -> Option<String> {
    OBJETO_TITLE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| t.chars().count() > 10)
}

/// First keyword present in the text (case-insensitive substring search).
pub fn status_keyword(text: &str, keywords: &[&str]) -> Option<String> {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .find(|k| lower.contains(&k.to_lowercase()))
        .map(|k| (*k).to_string())
}

/// Cut a summary to [`SUMMARY_MAX_CHARS`] characters plus the ellipsis
/// marker; shorter summaries pass through unmodified.
pub fn truncate_summary(summary: &str) -> String {
    let summary = summary.trim();
    if summary.chars().count() > SUMMARY_MAX_CHARS {
        let cut: String = summary.chars().take(SUMMARY_MAX_CHARS).collect();
        format!("{cut}{ELLIPSIS}")
    } else {
        summary.to_string()
    }
}

/// A ±100-character window around the first term found in the (lowercased)
/// page text, capped at [`SNIPPET_MAX_CHARS`]; falls back to the text head.
pub fn snippet(page_text_lower: &str, terms: &[String]) -> String {
    for term in terms {
        let needle = term.to_lowercase();
        if needle.is_empty() {
            continue;
        }
        if let Some(idx) = page_text_lower.find(&needle) {
            let start = floor_char_boundary(page_text_lower, idx.saturating_sub(100));
            let end = ceil_char_boundary(page_text_lower, (idx + 100).min(page_text_lower.len()));
            return take_chars(page_text_lower[start..end].trim(), SNIPPET_MAX_CHARS);
        }
    }
    take_chars(page_text_lower.trim(), SNIPPET_MAX_CHARS)
}

fn take_chars(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        text.chars().take(max).collect()
    } else {
        text.to_string()
    }
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}
