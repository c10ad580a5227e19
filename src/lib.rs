//! Peru Congress LGBT legislation scraper.
//!
//! Retrieves legislative records mentioning LGBT-related terms from Peru's
//! Congress archives, which span a modern JSON API and five generations of
//! legacy Lotus-Notes search portals, and normalizes them into one record
//! schema exported to disk.
//!
//! The interesting part is the per-era extraction layer under
//! [`infrastructure::parsing`]: each legislative period exposes law
//! metadata through a different markup convention (hidden form fields,
//! labeled table rows, free-text patterns, or the API), reconciled through
//! a shared fallback chain.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use domain::era::Era;
pub use domain::law_record::LawRecord;
