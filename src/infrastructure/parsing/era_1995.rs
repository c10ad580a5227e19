//! 1995–2001 extractor (`CLProLey2000.nsf`, the earliest portal).
//!
//! Hidden fields carry the record, but this generation also renders fields
//! in tables that the hidden map sometimes misses, so the table scan always
//! runs. Its markup needs both mechanical repairs: the unterminated
//! `</script` tags and the mixed-quote attribute runs.

use crate::domain::era::Era;
use crate::domain::law_record::CandidateLink;
use crate::infrastructure::html_repair;

use super::lotus::{self, LotusProfile};
use super::{link_discovery, EraExtractor, FieldSet};

const PROFILE: LotusProfile = LotusProfile {
    hidden_key_aliases: true,
    table_scan_always: true,
};

pub struct Era1995Extractor;

impl EraExtractor for Era1995Extractor {
    fn era(&self) -> Era {
        Era::P1995
    }

    fn discover_links(&self, html: &str, _term: &str) -> Vec<CandidateLink> {
        link_discovery::discover(html, "CLProLey2000.nsf")
    }

    fn extract_fields(&self, html: &str, _url: &str) -> FieldSet {
        lotus::extract_fields(html, PROFILE)
    }

    fn repair_markup(&self, html: String) -> String {
        let html = html_repair::fix_unterminated_script(&html);
        html_repair::fix_attribute_quote_runs(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repaired_broken_page_still_extracts() {
        let html = r#"
            <html><head><script>history.go()</script</head><body>
              <table border='1', cellpadding="2">
                <tr><td>Título</td><td>Ley de unión civil no matrimonial</td></tr>
              </table>
            </body></html>
        "#;
        let extractor = Era1995Extractor;
        let repaired = extractor.repair_markup(html.to_string());
        let fields = extractor.extract_fields(&repaired, "http://example");
        assert_eq!(
            fields.title.as_deref(),
            Some("Ley de unión civil no matrimonial")
        );
    }

    #[test]
    fn every_page_is_kept_without_a_relevance_check() {
        assert!(Era1995Extractor.is_relevant("texto sin términos", "gay"));
    }
}
