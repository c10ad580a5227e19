//! Pure merge of extractor output, link-discovery fallbacks and run
//! metadata into the canonical record.
//!
//! Extractor-derived values win over link-discovery guesses; whatever is
//! left empty gets its sentinel. No network or parsing logic lives here.

use chrono::Utc;

use crate::domain::era::Era;
use crate::domain::law_record::{CandidateLink, LawRecord, NOT_AVAILABLE};
use crate::infrastructure::parsing::FieldSet;

/// Build one record from a processed detail page.
pub fn normalize(
    link: &CandidateLink,
    fields: FieldSet,
    term: &str,
    found_terms: Vec<String>,
    content_snippet: String,
    era: Era,
) -> LawRecord {
    LawRecord {
        search_term_used: term.to_string(),
        found_terms,
        url: link.url.clone(),
        title: fields
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| fallback_title(link)),
        law_number: fields
            .law_number
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| link.project_number_guess.clone()),
        date: fields.date.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        status: fields.status.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        summary: fields.summary.unwrap_or_default(),
        authors: fields.authors.unwrap_or_default(),
        proponent: fields.proponent.unwrap_or_default(),
        committees: fields.committees,
        period: fields.period.unwrap_or_default(),
        legislature: fields.legislature.unwrap_or_default(),
        content_snippet,
        year_range: era.year_range().to_string(),
        scraped_at: Utc::now().to_rfc3339(),
    }
}

fn fallback_title(link: &CandidateLink) -> String {
    if link.raw_title.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        link.raw_title.trim().to_string()
    }
}
