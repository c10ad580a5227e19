//! Shared extraction path for the hidden-field Lotus-Notes eras
//! (1995–2001, 2001–2006, 2006–2011).
//!
//! Source precedence per field: hidden-field map, then labeled table rows,
//! then free-text patterns. The profile decides whether key aliases apply
//! and whether the table scan runs unconditionally or only when the page
//! exposed no hidden fields at all.

use scraper::Html;

use super::text_patterns::{
    labeled_title, law_number_free_text, sentence_title, status_keyword, STATUS_KEYWORDS,
};
use super::{fill, hidden_fields, table_rows, FieldSet};

/// Per-era knobs for the shared Lotus extraction path.
#[derive(Debug, Clone, Copy)]
pub struct LotusProfile {
    /// Accept the `CodIni_web_1` / `fechapre` hidden-key spellings.
    pub hidden_key_aliases: bool,
    /// Scan tables even when the hidden-field map was populated. The
    /// 2001–2011 portals render nothing in tables that is not already in
    /// the hidden fields, so they skip the scan unless the map is empty.
    pub table_scan_always: bool,
}

/// Run the full fallback chain over a repaired detail page.
pub fn extract_fields(html: &str, profile: LotusProfile) -> FieldSet {
    let doc = Html::parse_document(html);
    let mut fields = FieldSet::default();

    let hidden = hidden_fields::collect(&doc);
    hidden_fields::apply(&hidden, &mut fields, profile.hidden_key_aliases);

    if profile.table_scan_always || hidden.is_empty() {
        table_rows::fill_from_tables(&doc, &mut fields);
    }

    let text = doc.root_element().text().collect::<String>();
    fill(&mut fields.title, || {
        labeled_title(&text).or_else(|| sentence_title(&text))
    });
    fill(&mut fields.law_number, || law_number_free_text(&text));
    fill(&mut fields.status, || status_keyword(&text, STATUS_KEYWORDS));

    fields
}
