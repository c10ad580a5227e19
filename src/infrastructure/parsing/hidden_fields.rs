//! Hidden-form-field harvesting for the Lotus-Notes eras.
//!
//! The legacy pages carry the authoritative record data in concealed
//! `<input type="hidden">` elements; the visible tables are a rendering of
//! the same data and rank below this source in the fallback chain.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use super::text_patterns::truncate_summary;
use super::{fill, FieldSet};

static HIDDEN_INPUTS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"input[type="hidden"]"#).expect("static selector"));

/// Name → value map of a page's hidden inputs. Scoped to one extractor
/// invocation; empty values are kept so emptiness of the map itself stays
/// meaningful.
pub type HiddenFieldMap = HashMap<String, String>;

/// Collect every named hidden input on the page.
pub fn collect(doc: &Html) -> HiddenFieldMap {
    doc.select(&HIDDEN_INPUTS)
        .filter_map(|input| {
            let name = input.value().attr("name")?;
            let value = input.value().attr("value").unwrap_or_default();
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

/// First non-blank value among the given keys.
fn non_empty(map: &HiddenFieldMap, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Fill still-empty fields from the hidden-field map.
///
/// `with_aliases` additionally accepts the `CodIni_web_1` / `fechapre`
/// spellings the earliest portal emits.
pub fn apply(map: &HiddenFieldMap, fields: &mut FieldSet, with_aliases: bool) {
    let law_number_keys: &[&str] = if with_aliases {
        &["CodIni_web", "CodIni_web_1"]
    } else {
        &["CodIni_web"]
    };
    let date_keys: &[&str] = if with_aliases {
        &["FecPres", "fechapre"]
    } else {
        &["FecPres"]
    };

    fill(&mut fields.title, || non_empty(map, &["TitIni"]));
    fill(&mut fields.law_number, || non_empty(map, law_number_keys));
    fill(&mut fields.date, || non_empty(map, date_keys));
    fill(&mut fields.status, || non_empty(map, &["CodUltEsta"]));
    fill(&mut fields.proponent, || non_empty(map, &["DesPropo"]));
    fill(&mut fields.period, || non_empty(map, &["DesPerio"]));
    fill(&mut fields.legislature, || non_empty(map, &["DesLegis"]));
    fill(&mut fields.summary, || {
        non_empty(map, &["SumIni"]).map(|s| truncate_summary(&s))
    });
    fill(&mut fields.authors, || non_empty(map, &["NomCongre"]));

    if fields.committees.is_empty() {
        if let Some(committees) = non_empty(map, &["DesComi"]) {
            fields.committees = committees
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(inputs: &str) -> Html {
        Html::parse_document(&format!("<html><body><form>{inputs}</form></body></html>"))
    }

    #[test]
    fn collects_named_hidden_inputs() {
        let doc = page(
            r#"<input type="hidden" name="TitIni" value="Ley de unión civil">
               <input type="hidden" name="SumIni" value="">
               <input type="text" name="visible" value="no">"#,
        );
        let map = collect(&doc);
        assert_eq!(map.len(), 2);
        assert_eq!(map["TitIni"], "Ley de unión civil");
        assert_eq!(map["SumIni"], "");
    }

    #[test]
    fn apply_fills_fields_and_splits_committees() {
        let doc = page(
            r#"<input type="hidden" name="TitIni" value="Ley de identidad de género">
               <input type="hidden" name="CodIni_web" value="01234/2006-CR">
               <input type="hidden" name="FecPres" value="12/05/2007">
               <input type="hidden" name="DesComi" value="Justicia, Mujer y Familia">"#,
        );
        let map = collect(&doc);
        let mut fields = FieldSet::default();
        apply(&map, &mut fields, false);

        assert_eq!(fields.title.as_deref(), Some("Ley de identidad de género"));
        assert_eq!(fields.law_number.as_deref(), Some("01234/2006-CR"));
        assert_eq!(fields.date.as_deref(), Some("12/05/2007"));
        assert_eq!(fields.committees, vec!["Justicia", "Mujer y Familia"]);
    }

    #[test]
    fn aliases_only_apply_when_enabled() {
        let doc = page(
            r#"<input type="hidden" name="CodIni_web_1" value="00100/1998-CR">
               <input type="hidden" name="fechapre" value="03/09/1998">"#,
        );
        let map = collect(&doc);

        let mut without = FieldSet::default();
        apply(&map, &mut without, false);
        assert!(without.law_number.is_none());
        assert!(without.date.is_none());

        let mut with = FieldSet::default();
        apply(&map, &mut with, true);
        assert_eq!(with.law_number.as_deref(), Some("00100/1998-CR"));
        assert_eq!(with.date.as_deref(), Some("03/09/1998"));
    }

    #[test]
    fn blank_hidden_values_do_not_claim_the_slot() {
        let doc = page(r#"<input type="hidden" name="TitIni" value="   ">"#);
        let map = collect(&doc);
        let mut fields = FieldSet::default();
        apply(&map, &mut fields, false);
        assert!(fields.title.is_none());
    }

    #[test]
    fn hidden_summary_is_truncated() {
        let long = "s".repeat(400);
        let doc = page(&format!(
            r#"<input type="hidden" name="SumIni" value="{long}">"#
        ));
        let map = collect(&doc);
        let mut fields = FieldSet::default();
        apply(&map, &mut fields, false);
        assert_eq!(fields.summary.unwrap().chars().count(), 303);
    }
}
