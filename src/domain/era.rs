//! Era identity for the six generations of Congress search interfaces.
//!
//! Each legislative period exposes law metadata through a different portal:
//! four Lotus-Notes full-text search views (`debusqueda` / `debusqueda2`),
//! one late-generation view with the same shape, and a JSON API for the
//! current period. The [`Era`] enum carries everything that varies per
//! period except the markup conventions themselves, which live in the
//! matching extractor.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// Host serving every legacy portal.
pub const CONGRESO_BASE: &str = "https://www2.congreso.gob.pe";

/// One legislative period and its search interface generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Era {
    /// 1995–2001, `CLProLey2000.nsf` (earliest portal, `Start`/`Count` paging).
    P1995,
    /// 2001–2006, `CLProLey2001.nsf`.
    P2001,
    /// 2006–2011, `CLProLey2006.nsf`.
    P2006,
    /// 2011–2016, `CLProLey2011.nsf`.
    P2011,
    /// 2016–2021, `CLProLey2016.nsf`.
    P2016,
    /// 2021 onwards, spley-portal JSON API.
    Current,
}

impl Era {
    /// All eras in the order the full run processes them.
    pub const ALL: [Era; 6] = [
        Era::Current,
        Era::P2016,
        Era::P2011,
        Era::P2006,
        Era::P2001,
        Era::P1995,
    ];

    /// Short label used in export file names.
    pub fn label(self) -> &'static str {
        match self {
            Era::P1995 => "2000",
            Era::P2001 => "2001",
            Era::P2006 => "2006",
            Era::P2011 => "2011",
            Era::P2016 => "2016",
            Era::Current => "2021",
        }
    }

    /// Year-range label stamped on every record from this era.
    pub fn year_range(self) -> &'static str {
        match self {
            Era::P1995 => "1995-2001",
            Era::P2001 => "2001-2006",
            Era::P2006 => "2006-2011",
            Era::P2011 => "2011-2016",
            Era::P2016 => "2016-2021",
            Era::Current => "2021+",
        }
    }

    /// Lotus-Notes document-base token identifying this era's detail links.
    pub fn doc_base(self) -> Option<&'static str> {
        match self {
            Era::P1995 => Some("CLProLey2000.nsf"),
            Era::P2001 => Some("CLProLey2001.nsf"),
            Era::P2006 => Some("CLProLey2006.nsf"),
            Era::P2011 => Some("CLProLey2011.nsf"),
            Era::P2016 => Some("CLProLey2016.nsf"),
            Era::Current => None,
        }
    }

    fn search_endpoint(self) -> Option<&'static str> {
        match self {
            Era::P1995 => Some("/Sicr/TraDocEstProc/CLProLey2000.nsf/debusqueda"),
            Era::P2001 => Some("/Sicr/TraDocEstProc/CLProLey2001.nsf/debusqueda"),
            Era::P2006 => Some("/Sicr/TraDocEstProc/CLProLey2006.nsf/debusqueda"),
            Era::P2011 => Some("/Sicr/TraDocEstProc/CLProLey2011.nsf/debusqueda2"),
            Era::P2016 => Some("/Sicr/TraDocEstProc/CLProLey2016.nsf/debusqueda2"),
            Era::Current => None,
        }
    }

    /// Full-text search URL for a term, or `None` for the API era.
    ///
    /// The earliest portal pages with `Start`/`Count`; every later view
    /// takes `SearchMax`.
    pub fn search_url(self, term: &str, max_results: u32) -> Option<String> {
        let endpoint = self.search_endpoint()?;
        let query = utf8_percent_encode(term, NON_ALPHANUMERIC);
        let url = match self {
            Era::P1995 => format!(
                "{CONGRESO_BASE}{endpoint}?SearchView&Query={query}&SearchOrder=4&Start=1&Count={max_results}"
            ),
            _ => format!(
                "{CONGRESO_BASE}{endpoint}?SearchView&Query={query}&SearchOrder=4&SearchMax={max_results}"
            ),
        };
        Some(url)
    }

    /// Whether this era is served by a legacy HTML portal.
    pub fn is_legacy(self) -> bool {
        !matches!(self, Era::Current)
    }

    /// Whether detail fetches need the minimal curl-style agent. The three
    /// oldest portals serve truncated bodies to browser user agents.
    pub fn uses_minimal_agent(self) -> bool {
        matches!(self, Era::P1995 | Era::P2001 | Era::P2006)
    }

    /// Pause inserted after each detail-page fetch. Older servers get the
    /// longer pauses; this is a minimum-delay contract, not a tuning knob.
    pub fn page_delay(self) -> Duration {
        match self {
            Era::P1995 | Era::P2001 | Era::P2006 => Duration::from_millis(1200),
            Era::P2011 => Duration::from_millis(1000),
            Era::P2016 => Duration::from_millis(800),
            Era::Current => Duration::from_millis(500),
        }
    }

    /// Pause inserted after each full term sweep.
    pub fn term_delay(self) -> Duration {
        match self {
            Era::Current => Duration::from_secs(1),
            _ => Duration::from_secs(2),
        }
    }
}
