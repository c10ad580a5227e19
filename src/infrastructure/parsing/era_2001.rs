//! 2001–2006 extractor (`CLProLey2001.nsf`).
//!
//! Same document system as the 2006–2011 portal: hidden fields are
//! authoritative and the table rendering only matters when a page exposes
//! no hidden fields at all.

use crate::domain::era::Era;
use crate::domain::law_record::CandidateLink;
use crate::infrastructure::html_repair;

use super::lotus::{self, LotusProfile};
use super::{link_discovery, EraExtractor, FieldSet};

const PROFILE: LotusProfile = LotusProfile {
    hidden_key_aliases: false,
    table_scan_always: false,
};

pub struct Era2001Extractor;

impl EraExtractor for Era2001Extractor {
    fn era(&self) -> Era {
        Era::P2001
    }

    fn discover_links(&self, html: &str, _term: &str) -> Vec<CandidateLink> {
        link_discovery::discover(html, "CLProLey2001.nsf")
    }

    fn extract_fields(&self, html: &str, _url: &str) -> FieldSet {
        lotus::extract_fields(html, PROFILE)
    }

    fn repair_markup(&self, html: String) -> String {
        html_repair::fix_unterminated_script(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_only_its_own_document_base() {
        let html = r#"
            <a href="/x/CLProLey2001.nsf/a?OpenDocument">01111/2002-CR propia</a>
            <a href="/x/CLProLey2006.nsf/b?OpenDocument">ajena</a>
        "#;
        let links = Era2001Extractor.discover_links(html, "unión civil");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].project_number_guess, "01111/2002-CR");
    }
}
