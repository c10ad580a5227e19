//! 2006–2011 extractor (`CLProLey2006.nsf`).

use crate::domain::era::Era;
use crate::domain::law_record::CandidateLink;
use crate::infrastructure::html_repair;

use super::lotus::{self, LotusProfile};
use super::{link_discovery, EraExtractor, FieldSet};

const PROFILE: LotusProfile = LotusProfile {
    hidden_key_aliases: false,
    table_scan_always: false,
};

pub struct Era2006Extractor;

impl EraExtractor for Era2006Extractor {
    fn era(&self) -> Era {
        Era::P2006
    }

    fn discover_links(&self, html: &str, _term: &str) -> Vec<CandidateLink> {
        link_discovery::discover(html, "CLProLey2006.nsf")
    }

    fn extract_fields(&self, html: &str, _url: &str) -> FieldSet {
        lotus::extract_fields(html, PROFILE)
    }

    fn repair_markup(&self, html: String) -> String {
        html_repair::fix_unterminated_script(&html)
    }
}
