//! Candidate-link discovery on search-results pages.
//!
//! Every era's results page is scanned the same way; only the
//! document-base token differs. Only the first results page is consulted —
//! the portals' own `SearchMax` / `Count` caps bound the sweep.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::domain::era::CONGRESO_BASE;
use crate::domain::law_record::{CandidateLink, NOT_AVAILABLE};

use super::text_patterns::project_number;

static ANCHORS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("static selector"));

/// Scan all anchors and keep those pointing at this era's detail documents:
/// the href must carry the document-base token and an `opendocument` action
/// marker (case-insensitive). Document order; zero matches is a valid empty
/// outcome.
pub fn discover(html: &str, doc_base: &str) -> Vec<CandidateLink> {
    let doc = Html::parse_document(html);
    let mut links = Vec::new();

    for anchor in doc.select(&ANCHORS) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href.contains(doc_base) || !href.to_lowercase().contains("opendocument") {
            continue;
        }

        let raw_title = anchor.text().collect::<String>().trim().to_string();
        let project_number_guess = project_number(&raw_title)
            .or_else(|| parent_text(&anchor).and_then(|text| project_number(&text)))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        links.push(CandidateLink {
            url: resolve_url(href),
            raw_title,
            project_number_guess,
        });
    }

    links
}

/// Resolve root-relative, bare-relative and already-absolute hrefs against
/// the portal host.
fn resolve_url(href: &str) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }
    match Url::parse(CONGRESO_BASE).and_then(|base| base.join(href)) {
        Ok(url) => url.into(),
        Err(_) => format!("{}/{}", CONGRESO_BASE, href.trim_start_matches('/')),
    }
}

fn parent_text(anchor: &ElementRef<'_>) -> Option<String> {
    anchor
        .parent()
        .and_then(ElementRef::wrap)
        .map(|parent| parent.text().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC_BASE: &str = "CLProLey2016.nsf";

    #[test]
    fn keeps_only_links_matching_the_era_signature() {
        let html = r#"
            <a href="/Sicr/TraDocEstProc/CLProLey2016.nsf/abc/def?OpenDocument">05493/2020-CR Ley de identidad</a>
            <a href="/Sicr/TraDocEstProc/CLProLey2011.nsf/abc/def?OpenDocument">otra era</a>
            <a href="/portada/inicio.htm">navegación</a>
        "#;
        let links = discover(html, DOC_BASE);
        assert_eq!(links.len(), 1);
        assert_eq!(
            links[0].url,
            "https://www2.congreso.gob.pe/Sicr/TraDocEstProc/CLProLey2016.nsf/abc/def?OpenDocument"
        );
        assert_eq!(links[0].project_number_guess, "05493/2020-CR");
    }

    #[test]
    fn action_marker_is_case_insensitive() {
        let html = r#"<a href="/x/CLProLey2016.nsf/y?opendocument">enlace</a>"#;
        assert_eq!(discover(html, DOC_BASE).len(), 1);
    }

    #[test]
    fn absolute_urls_pass_through() {
        let html = r#"<a href="https://www2.congreso.gob.pe/x/CLProLey2016.nsf/y?OpenDocument">x</a>"#;
        let links = discover(html, DOC_BASE);
        assert!(links[0].url.starts_with("https://www2.congreso.gob.pe/x/"));
    }

    #[test]
    fn bare_relative_urls_are_resolved_against_the_host() {
        let html = r#"<a href="Sicr/CLProLey2016.nsf/y?OpenDocument">x</a>"#;
        let links = discover(html, DOC_BASE);
        assert_eq!(
            links[0].url,
            "https://www2.congreso.gob.pe/Sicr/CLProLey2016.nsf/y?OpenDocument"
        );
    }

    #[test]
    fn project_number_falls_back_to_parent_text() {
        let html = r#"
            <td>Proyecto 03336/2011-CR:
                <a href="/x/CLProLey2016.nsf/y?OpenDocument">ver detalle</a>
            </td>
        "#;
        let links = discover(html, DOC_BASE);
        assert_eq!(links[0].project_number_guess, "03336/2011-CR");
    }

    #[test]
    fn missing_project_number_yields_sentinel() {
        let html = r#"<a href="/x/CLProLey2016.nsf/y?OpenDocument">sin datos</a>"#;
        let links = discover(html, DOC_BASE);
        assert_eq!(links[0].project_number_guess, NOT_AVAILABLE);
    }

    #[test]
    fn page_without_matches_yields_empty_sequence() {
        assert!(discover("<html><body><p>Sin resultados</p></body></html>", DOC_BASE).is_empty());
    }
}
