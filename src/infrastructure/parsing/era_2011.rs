//! 2011–2016 extractor (`CLProLey2011.nsf`).
//!
//! This generation renders every field as a labeled line of visible text,
//! so extraction is a pure pattern pass. Status and committees additionally
//! check the raw markup for the `CodUltEsta` / `DesComi` hidden-input
//! values, which this portal fills but never renders.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

use crate::domain::era::Era;
use crate::domain::law_record::CandidateLink;

use super::text_patterns::{labeled_title, sentence_title, truncate_summary};
use super::{fill, link_discovery, EraExtractor, FieldSet};

static NUMERO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Número:\s*([^\s\n]+)").expect("static pattern"));
static NUM_SUFFIXED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4,5}/\d{4}-(?:PE|CR))").expect("static pattern"));
static PROYECTO_NUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)PROYECTO\s+N[°º]?\s*(\d+)").expect("static pattern"));

static FECHA_PRESENTACION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Fecha Presentación:\s*(\d{1,2}/\d{1,2}/\d{4})").expect("static pattern"));
static FECHA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Fecha:\s*(\d{1,2}/\d{1,2}/\d{4})").expect("static pattern"));

static PROPONENTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Proponente:\s*([^\n]+)").expect("static pattern"));
static PERIODO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Período:\s*([^\n]+)").expect("static pattern"));
static LEGISLATURA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Legislatura:\s*([^\n]+)").expect("static pattern"));
static SUMILLA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Sumilla:\s*([^\n]+)").expect("static pattern"));
static AUTORES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Autores[^:\n]*:\s*([^\n]+)").expect("static pattern"));

static COD_ULT_ESTA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"CodUltEsta[^>]*value="([^"]+)""#).expect("static pattern"));
static DES_COMI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"DesComi[^>]*value="([^"]+)""#).expect("static pattern"));

/// Status wording this portal uses, first match wins.
const STATUS_KEYWORDS_2011: &[&str] = &[
    "Publicado El Peruano",
    "En comisión",
    "Dictamen",
    "Observado",
    "Al Archivo",
];

static SEGUIMIENTO_DECRETADO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)Seguimiento:\s*.*?Decretado a\.\.\.\s*([^\n<]+)").expect("static pattern")
});
static EN_COMISION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)En comisión\s+([^\n<]+)").expect("static pattern"));
static COMISION_DE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)comisión\s+de\s+([^\n<]+)").expect("static pattern"));
static DECRETADO_A: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Decretado a\.\.\.\s*([^\n<]+)").expect("static pattern"));

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
}

pub struct Era2011Extractor;

impl EraExtractor for Era2011Extractor {
    fn era(&self) -> Era {
        Era::P2011
    }

    fn discover_links(&self, html: &str, _term: &str) -> Vec<CandidateLink> {
        link_discovery::discover(html, "CLProLey2011.nsf")
    }

    fn extract_fields(&self, html: &str, _url: &str) -> FieldSet {
        let text = Html::parse_document(html)
            .root_element()
            .text()
            .collect::<String>();
        let mut fields = FieldSet::default();

        fill(&mut fields.title, || {
            labeled_title(&text).or_else(|| sentence_title(&text))
        });
        fill(&mut fields.law_number, || {
            capture(&NUMERO, &text)
                .or_else(|| capture(&NUM_SUFFIXED, &text))
                .or_else(|| capture(&PROYECTO_NUM, &text))
        });
        fill(&mut fields.date, || {
            capture(&FECHA_PRESENTACION, &text).or_else(|| capture(&FECHA, &text))
        });
        fill(&mut fields.proponent, || capture(&PROPONENTE, &text));
        fill(&mut fields.period, || capture(&PERIODO, &text));
        fill(&mut fields.legislature, || capture(&LEGISLATURA, &text));
        fill(&mut fields.summary, || {
            capture(&SUMILLA, &text).map(|s| truncate_summary(&s))
        });
        fill(&mut fields.authors, || capture(&AUTORES, &text));

        // the portal fills these hidden inputs but never renders them
        fill(&mut fields.status, || {
            capture(&COD_ULT_ESTA, html).or_else(|| {
                let lower = text.to_lowercase();
                STATUS_KEYWORDS_2011
                    .iter()
                    .find(|k| lower.contains(&k.to_lowercase()))
                    .map(|k| (*k).to_string())
            })
        });

        if fields.committees.is_empty() {
            fields.committees = extract_committees(html, &text);
        }

        fields
    }
}

fn extract_committees(html: &str, text: &str) -> Vec<String> {
    if let Some(value) = capture(&DES_COMI, html) {
        let committees: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        if !committees.is_empty() {
            return committees;
        }
    }

    for pattern in [&*SEGUIMIENTO_DECRETADO, &*EN_COMISION, &*COMISION_DE, &*DECRETADO_A] {
        if let Some(committee) = capture(pattern, text) {
            return vec![committee];
        }
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <input type="hidden" name="CodUltEsta" value="En comisión Mujer y Familia">
          <input type="hidden" name="DesComi" value="Mujer y Familia, Justicia">
          <p>Período: Período Parlamentario 2011 - 2016</p>
          <p>Legislatura: Primera Legislatura Ordinaria 2012</p>
          <p>Número: 01687/2012-CR</p>
          <p>Fecha Presentación: 07/11/2012</p>
          <p>Proponente: Congreso</p>
          <p>Título: Ley que establece la unión civil no matrimonial</p>
          <p>Sumilla: Propone establecer la unión civil no matrimonial para parejas del mismo sexo.</p>
          <p>Autores (*): Bruce C., De la Torre D.</p>
        </body></html>
    "#;

    #[test]
    fn labeled_lines_populate_the_field_set() {
        let fields = Era2011Extractor.extract_fields(PAGE, "http://example");
        assert_eq!(fields.law_number.as_deref(), Some("01687/2012-CR"));
        assert_eq!(fields.date.as_deref(), Some("07/11/2012"));
        assert_eq!(fields.proponent.as_deref(), Some("Congreso"));
        assert_eq!(
            fields.title.as_deref(),
            Some("Ley que establece la unión civil no matrimonial")
        );
        assert_eq!(fields.authors.as_deref(), Some("Bruce C., De la Torre D."));
        assert!(fields.summary.unwrap().starts_with("Propone establecer"));
    }

    #[test]
    fn status_and_committees_come_from_hidden_input_values() {
        let fields = Era2011Extractor.extract_fields(PAGE, "http://example");
        assert_eq!(fields.status.as_deref(), Some("En comisión Mujer y Familia"));
        assert_eq!(fields.committees, vec!["Mujer y Familia", "Justicia"]);
    }

    #[test]
    fn committee_falls_back_to_seguimiento_text() {
        let html = r#"
            <html><body>
              <p>Seguimiento: 08/11/2012 Decretado a... Justicia y Derechos Humanos</p>
            </body></html>
        "#;
        let fields = Era2011Extractor.extract_fields(html, "http://example");
        assert_eq!(fields.committees, vec!["Justicia y Derechos Humanos"]);
    }

    #[test]
    fn missing_structure_yields_empty_slots() {
        let fields = Era2011Extractor.extract_fields("<html><body></body></html>", "u");
        assert_eq!(fields, FieldSet::default());
    }
}
