//! End-to-end pipeline over fixture API envelopes: search response →
//! detail response → canonical record, without touching the network.

use congreso_lgbt_scraper::domain::law_record::NOT_AVAILABLE;
use congreso_lgbt_scraper::infrastructure::api::{
    merge_project, parse_detail_response, parse_search_response, ApiError,
};

const SEARCH_BODY: &str = r#"{
    "code": 200,
    "status": "success",
    "data": {
        "proyectos": [
            {"perParId": 2021, "pleyNum": "123", "proyectoLey": "00123/2021-CR", "titulo": "Ley X"}
        ],
        "rowsTotal": 1
    }
}"#;

const DETAIL_BODY: &str = r#"{
    "code": 200,
    "data": {"general": {"sumilla": "resumen"}, "comisiones": []}
}"#;

#[test]
fn fixture_envelopes_produce_exactly_one_canonical_record() {
    let search = parse_search_response(SEARCH_BODY).unwrap();
    assert_eq!(search.rows_total, 1);
    assert_eq!(search.proyectos.len(), 1);

    let detail = parse_detail_response(DETAIL_BODY).unwrap();
    let record = merge_project(&search.proyectos[0], Some(&detail), "matrimonio igualitario");

    assert_eq!(record.law_number, "00123/2021-CR");
    assert_eq!(record.summary, "resumen");
    assert!(record.committees.is_empty());
    assert_eq!(record.title, "Ley X");
    assert_eq!(record.search_term_used, "matrimonio igualitario");
    assert_eq!(record.year_range, "2021+");
    assert_eq!(
        record.url,
        "https://wb2server.congreso.gob.pe/spley-portal/#/expediente/main/2021/123"
    );
    // fields the fixtures never mention still exist with their sentinels
    assert_eq!(record.date, NOT_AVAILABLE);
    assert_eq!(record.status, NOT_AVAILABLE);
    assert_eq!(record.authors, "");
    assert!(record.found_terms.is_empty());
    assert!(!record.scraped_at.is_empty());
}

#[test]
fn non_success_search_envelope_is_a_zero_result_outcome() {
    let rejected = r#"{"code": 200, "status": "throttled", "data": null}"#;
    assert!(matches!(
        parse_search_response(rejected),
        Err(ApiError::Rejected { .. })
    ));

    let error_code = r#"{"code": 503, "status": "success", "data": null}"#;
    assert!(matches!(
        parse_search_response(error_code),
        Err(ApiError::Rejected { code: 503, .. })
    ));
}

#[test]
fn detail_rejection_skips_the_record() {
    let rejected = r#"{"code": 404, "data": null}"#;
    assert!(parse_detail_response(rejected).is_err());
}

#[test]
fn committee_names_map_from_the_detail_payload() {
    let detail = parse_detail_response(
        r#"{"code": 200, "data": {
            "general": {"sumilla": "s", "desPerParAbrev": "2021-2026", "desLegis": "Primera"},
            "comisiones": [{"nombre": "Mujer y Familia"}, {"nombre": "Justicia"}]
        }}"#,
    )
    .unwrap();
    let search = parse_search_response(SEARCH_BODY).unwrap();
    let record = merge_project(&search.proyectos[0], Some(&detail), "gay");

    assert_eq!(record.committees, vec!["Mujer y Familia", "Justicia"]);
    assert_eq!(record.period, "2021-2026");
    assert_eq!(record.legislature, "Primera");
}
