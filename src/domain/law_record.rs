//! Canonical record schema shared by every era.

use serde::{Deserialize, Serialize};

/// Sentinel for scalar fields no source could populate.
pub const NOT_AVAILABLE: &str = "N/A";

/// A detail-page candidate produced by link discovery.
///
/// Consumed immediately by the field extractor; never persisted. The
/// project-number guess comes from the link text (or its parent element)
/// and defaults to [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    pub url: String,
    pub raw_title: String,
    pub project_number_guess: String,
}

/// One normalized legislative record.
///
/// Every field is structurally present: scalar fields fall back to
/// [`NOT_AVAILABLE`] or the empty string, sequences to empty vectors.
/// Records are immutable once built and are accumulated in an ordered
/// sequence owned by the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LawRecord {
    pub search_term_used: String,
    /// Catalog terms found in the page text, in catalog order.
    pub found_terms: Vec<String>,
    pub url: String,
    pub title: String,
    pub law_number: String,
    /// Presentation date as the portal printed it; formats vary by era and
    /// are preserved verbatim.
    pub date: String,
    pub status: String,
    /// Truncated to 300 chars with an ellipsis marker.
    pub summary: String,
    pub authors: String,
    pub proponent: String,
    pub committees: Vec<String>,
    pub period: String,
    pub legislature: String,
    pub content_snippet: String,
    /// Era label, e.g. `1995-2001`.
    pub year_range: String,
    /// ISO-8601 timestamp stamped at merge time.
    pub scraped_at: String,
}
