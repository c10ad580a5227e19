//! Per-era HTML extraction.
//!
//! Each legislative period gets one [`EraExtractor`] implementation,
//! selected by the [`Era`] enum at the call site. All legacy variants share
//! the same source precedence per field — hidden form fields, then labeled
//! table rows, then free-text patterns — stopping at the first source that
//! yields a non-empty value. Which sources apply, and under which exact
//! labels and keys, varies by era.

pub mod era_1995;
pub mod era_2001;
pub mod era_2006;
pub mod era_2011;
pub mod era_2016;
pub mod hidden_fields;
pub mod link_discovery;
pub mod lotus;
pub mod table_rows;
pub mod text_patterns;

pub use era_1995::Era1995Extractor;
pub use era_2001::Era2001Extractor;
pub use era_2006::Era2006Extractor;
pub use era_2011::Era2011Extractor;
pub use era_2016::Era2016Extractor;

use scraper::Html;

use crate::domain::era::Era;
use crate::domain::law_record::CandidateLink;

/// Extractor output: one slot per canonical scalar field plus committees.
/// `None` slots fall back to link-discovery guesses and sentinels during
/// normalization.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldSet {
    pub title: Option<String>,
    pub law_number: Option<String>,
    pub date: Option<String>,
    pub status: Option<String>,
    pub summary: Option<String>,
    pub authors: Option<String>,
    pub proponent: Option<String>,
    pub committees: Vec<String>,
    pub period: Option<String>,
    pub legislature: Option<String>,
}

/// One era's extraction contract.
///
/// Implementations are pure over page content: no network access, no
/// shared state. A page the extractor cannot make sense of yields an empty
/// [`FieldSet`] or an empty link list, never an error.
pub trait EraExtractor: Send + Sync {
    fn era(&self) -> Era;

    /// Scan a search-results page for detail-page candidates, in document
    /// order. Zero matches is a valid outcome.
    fn discover_links(&self, html: &str, term: &str) -> Vec<CandidateLink>;

    /// Extract whatever fields the page yields; missing structure produces
    /// empty slots, not errors.
    fn extract_fields(&self, html: &str, url: &str) -> FieldSet;

    /// Whether a fetched page should be kept for this term. Most eras trust
    /// the search endpoint's filtering and keep everything; the 2016–2021
    /// portal double-checks term presence.
    fn is_relevant(&self, _page_text: &str, _term: &str) -> bool {
        true
    }

    /// Apply this era's mechanical markup repairs before parsing.
    fn repair_markup(&self, html: String) -> String {
        html
    }
}

/// The extractor for a legacy era, or `None` for the API-backed period.
pub fn extractor_for(era: Era) -> Option<Box<dyn EraExtractor>> {
    match era {
        Era::P1995 => Some(Box::new(Era1995Extractor)),
        Era::P2001 => Some(Box::new(Era2001Extractor)),
        Era::P2006 => Some(Box::new(Era2006Extractor)),
        Era::P2011 => Some(Box::new(Era2011Extractor)),
        Era::P2016 => Some(Box::new(Era2016Extractor)),
        Era::Current => None,
    }
}

/// Visible text of a whole page, as one string.
pub fn page_text(html: &str) -> String {
    Html::parse_document(html)
        .root_element()
        .text()
        .collect::<String>()
}

/// Assign `slot` from `source` only when it is still empty. Together with
/// the call order this makes the per-field source precedence explicit.
pub(crate) fn fill<F: FnOnce() -> Option<String>>(slot: &mut Option<String>, source: F) {
    if slot.is_none() {
        if let Some(value) = source() {
            let value = value.trim().to_string();
            if !value.is_empty() {
                *slot = Some(value);
            }
        }
    }
}
