//! 2016–2021 extractor (`CLProLey2016.nsf`).
//!
//! The last portal generation before the JSON API. No hidden fields, no
//! labeled `Título:` line; titles come from `LEY`/`PROPONE`/`OBJETO:`
//! sentences and the summary is reassembled from the
//! `Objeto del Proyecto de Ley:` section. This is also the one era that
//! re-checks term presence on the detail page instead of trusting the
//! search endpoint's filtering.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

use crate::domain::era::Era;
use crate::domain::law_record::CandidateLink;
use crate::domain::terms;

use super::text_patterns::{objeto_title, sentence_title, truncate_summary};
use super::{fill, link_discovery, EraExtractor, FieldSet};

static NUM_CR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4,5}/\d{4}-CR)").expect("static pattern"));
static PROYECTO_NUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)PROYECTO\s+N[°º]?\s*(\d+)").expect("static pattern"));
static PL_NUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)PL\s*(\d+)").expect("static pattern"));

static PRESENTADO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Presentado:\s*(\d{1,2}/\d{1,2}/\d{4})").expect("static pattern"));
static FECHA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Fecha:\s*(\d{1,2}/\d{1,2}/\d{4})").expect("static pattern"));
static BARE_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2}/\d{1,2}/\d{4})").expect("static pattern"));

static STATUS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)Al\s+Archivo",
        r"(?i)Presentado",
        r"(?i)En\s+Comisión",
        r"(?i)Aprobado",
        r"(?i)Rechazado",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

static GRUPO_AUTHORS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Grupo Parlamentario:[^\n]*\n([^\n]+(?:,[^\n]+)*)").expect("static pattern")
});
static PROPONENTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Proponente:\s*([^\n]+)").expect("static pattern"));
static PERIODO_PARLAMENTARIO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Período\s*Parlamentario:\s*([^\n]+)").expect("static pattern")
});
static LEGISLATURA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Legislatura:\s*([^\n]+)").expect("static pattern"));

static COMISION_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Comisión[es]*:\s*([^.\n]+)").expect("static pattern"));
static COMISION_DE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Comisión\s+de\s+([^.\n]+)").expect("static pattern"));

const OBJETO_MARKER: &str = "Objeto del Proyecto de Ley:";
const NAV_WORDS: &[&str] = &["menu", "navigation", "congreso", "inicio", "buscar"];

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
}

pub struct Era2016Extractor;

impl EraExtractor for Era2016Extractor {
    fn era(&self) -> Era {
        Era::P2016
    }

    fn discover_links(&self, html: &str, _term: &str) -> Vec<CandidateLink> {
        link_discovery::discover(html, "CLProLey2016.nsf")
    }

    fn extract_fields(&self, html: &str, _url: &str) -> FieldSet {
        let text = Html::parse_document(html)
            .root_element()
            .text()
            .collect::<String>();
        let mut fields = FieldSet::default();

        fill(&mut fields.title, || {
            sentence_title(&text).or_else(|| objeto_title(&text))
        });
        fill(&mut fields.law_number, || {
            capture(&NUM_CR, &text)
                .or_else(|| capture(&PROYECTO_NUM, &text))
                .or_else(|| capture(&PL_NUM, &text))
        });
        fill(&mut fields.date, || {
            capture(&PRESENTADO, &text)
                .or_else(|| capture(&FECHA, &text))
                .or_else(|| capture(&BARE_DATE, &text))
        });
        fill(&mut fields.status, || {
            STATUS_PATTERNS
                .iter()
                .find_map(|p| p.find(&text))
                .map(|m| m.as_str().to_string())
        });
        fill(&mut fields.authors, || capture(&GRUPO_AUTHORS, &text));
        fill(&mut fields.proponent, || capture(&PROPONENTE, &text));
        fill(&mut fields.period, || capture(&PERIODO_PARLAMENTARIO, &text));
        fill(&mut fields.legislature, || capture(&LEGISLATURA, &text));

        if fields.committees.is_empty() {
            fields.committees = extract_committees(&text);
        }

        fill(&mut fields.summary, || objeto_summary(&text));

        fields
    }

    /// Keep a page only when the search term or any catalog term actually
    /// appears in its text; this portal's search view is known to leak
    /// unrelated documents.
    fn is_relevant(&self, page_text: &str, term: &str) -> bool {
        page_text.contains(&term.to_lowercase()) || !terms::found_in(page_text).is_empty()
    }
}

fn extract_committees(text: &str) -> Vec<String> {
    for pattern in [&*COMISION_LABEL, &*COMISION_DE] {
        let committees: Vec<String> = pattern
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        if !committees.is_empty() {
            return committees;
        }
    }
    Vec::new()
}

/// Reassemble the summary from the `Objeto del Proyecto de Ley:` section,
/// skipping navigation chrome and stopping once enough content is gathered.
fn objeto_summary(text: &str) -> Option<String> {
    let position = text.find(OBJETO_MARKER)?;
    let remaining = &text[position + OBJETO_MARKER.len()..];

    let mut collected: Vec<&str> = Vec::new();
    for line in remaining.lines() {
        let line = line.trim();
        if line.chars().count() <= 10 || line.starts_with("http") || line.starts_with("www") {
            continue;
        }
        let lower = line.to_lowercase();
        if NAV_WORDS.iter().any(|word| lower.contains(word)) {
            continue;
        }
        collected.push(line);
        if collected.join(" ").chars().count() > 200 {
            break;
        }
    }

    if collected.is_empty() {
        return None;
    }
    let joined = collected.join(" ");
    let normalized = joined.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.chars().count() > 20 {
        Some(truncate_summary(&normalized))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <p>Expediente 05493/2020-CR</p>
          <p>Presentado: 09/06/2020</p>
          <p>Período Parlamentario: Período Parlamentario 2016 - 2021</p>
          <p>Legislatura: Primera Legislatura Ordinaria 2020</p>
          <p>Proponente: Congreso</p>
          <p>LEY DE IDENTIDAD DE GÉNERO PARA PERSONAS TRANS</p>
          <p>Objeto del Proyecto de Ley:</p>
          <p>La presente ley tiene por objeto establecer el procedimiento de cambio de nombre y rectificación de sexo ante RENIEC para personas trans.</p>
          <p>Comisión: Mujer y Familia</p>
          <p>En Comisión desde el 12/06/2020</p>
        </body></html>
    "#;

    #[test]
    fn free_text_extraction_covers_all_fields() {
        let fields = Era2016Extractor.extract_fields(PAGE, "http://example");
        assert_eq!(fields.law_number.as_deref(), Some("05493/2020-CR"));
        assert_eq!(fields.date.as_deref(), Some("09/06/2020"));
        assert!(fields.title.as_deref().unwrap().starts_with("LEY DE IDENTIDAD"));
        assert_eq!(fields.committees, vec!["Mujer y Familia"]);
        assert!(fields
            .summary
            .as_deref()
            .unwrap()
            .contains("rectificación de sexo"));
        assert_eq!(
            fields.period.as_deref(),
            Some("Período Parlamentario 2016 - 2021")
        );
    }

    #[test]
    fn status_follows_the_fixed_pattern_order() {
        let fields = Era2016Extractor.extract_fields(PAGE, "http://example");
        // "Presentado" precedes "En Comisión" in the ordered pattern list
        assert_eq!(fields.status.as_deref(), Some("Presentado"));
    }

    #[test]
    fn relevance_requires_a_term_hit() {
        let extractor = Era2016Extractor;
        assert!(extractor.is_relevant("texto con matrimonio igualitario", "gay"));
        assert!(extractor.is_relevant("aparece el término gay aquí", "gay"));
        assert!(!extractor.is_relevant("ley de transporte urbano", "gay"));
    }

    #[test]
    fn objeto_summary_skips_navigation_lines() {
        let text = "Objeto del Proyecto de Ley:\n\
                    Congreso de la República del Perú\n\
                    www.congreso.gob.pe\n\
                    Propone reconocer el matrimonio entre personas del mismo sexo y su registro civil.\n";
        let summary = objeto_summary(text).unwrap();
        assert!(summary.starts_with("Propone reconocer"));
        assert!(!summary.to_lowercase().contains("congreso"));
    }
}
