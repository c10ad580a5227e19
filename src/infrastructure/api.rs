//! Client for the spley-portal JSON API serving the 2021+ period.
//!
//! Structurally the simplest era: no HTML, no hidden fields, no encoding
//! repair. Search is a POST with a structured filter payload; details are a
//! GET keyed by `(periodId, projectNumber)`. Envelope rejections
//! (`code != 200` or `status != "success"`) are zero-result outcomes for
//! the term, never fatal. Response parsing and record merging are pure
//! functions so the whole pipeline is testable on fixture JSON.

use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ORIGIN, REFERER};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::era::Era;
use crate::domain::law_record::{LawRecord, NOT_AVAILABLE};
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::parsing::text_patterns::{truncate_summary, SNIPPET_MAX_CHARS};

pub const SEARCH_API: &str =
    "https://wb2server.congreso.gob.pe/spley-portal-service/proyecto-ley/lista-con-filtro";
pub const DETAIL_API: &str = "https://wb2server.congreso.gob.pe/spley-portal-service/expediente";
const PORTAL_URL: &str = "https://wb2server.congreso.gob.pe/spley-portal";

/// Current parliamentary period id, fixed in the search filter.
pub const CURRENT_PERIOD_ID: u32 = 2021;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("search rejected by API: code={code}, status={status}")]
    Rejected { code: i64, status: String },
    #[error("malformed API response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Search filter payload. Everything except the period id, the free-text
/// field and the paging window stays null.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPayload {
    pub per_par_id: u32,
    pub per_leg_id: Option<u32>,
    pub comision_id: Option<u32>,
    pub estado_id: Option<u32>,
    pub congresista_id: Option<u32>,
    pub grupo_parlamentario_id: Option<u32>,
    pub proponente_id: Option<u32>,
    pub legislatura_id: Option<u32>,
    pub fec_presentacion_desde: Option<String>,
    pub fec_presentacion_hasta: Option<String>,
    pub pley_num: Option<u32>,
    pub palabras: String,
    pub tipo_firmante_id: Option<u32>,
    pub page_size: u32,
    pub row_start: u32,
}

impl SearchPayload {
    pub fn for_term(term: &str, page_size: u32) -> Self {
        Self {
            per_par_id: CURRENT_PERIOD_ID,
            per_leg_id: None,
            comision_id: None,
            estado_id: None,
            congresista_id: None,
            grupo_parlamentario_id: None,
            proponente_id: None,
            legislatura_id: None,
            fec_presentacion_desde: None,
            fec_presentacion_hasta: None,
            pley_num: None,
            palabras: term.to_string(),
            tipo_firmante_id: None,
            page_size,
            row_start: 0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    status: String,
    data: Option<SearchData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchData {
    #[serde(default)]
    pub proyectos: Vec<ProjectSummary>,
    #[serde(default)]
    pub rows_total: i64,
}

/// Project summary as returned by the search endpoint. Numeric-looking
/// fields arrive as either JSON numbers or strings depending on the
/// deployment, so the project number is normalized on deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    #[serde(default)]
    pub per_par_id: Option<i64>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub pley_num: Option<String>,
    #[serde(default)]
    pub proyecto_ley: Option<String>,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub des_estado: Option<String>,
    #[serde(default)]
    pub fec_presentacion: Option<String>,
    #[serde(default)]
    pub des_proponente: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub autores: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailEnvelope {
    #[serde(default)]
    code: i64,
    data: Option<Expediente>,
}

/// Detail payload for one project.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Expediente {
    #[serde(default)]
    pub general: Option<ExpedienteGeneral>,
    #[serde(default)]
    pub comisiones: Vec<Comision>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpedienteGeneral {
    #[serde(default)]
    pub sumilla: Option<String>,
    #[serde(default)]
    pub des_per_par_abrev: Option<String>,
    #[serde(default)]
    pub des_legis: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Comision {
    #[serde(default)]
    pub nombre: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }))
}

/// Parse a search response body. Envelope rejections come back as
/// [`ApiError::Rejected`]; the caller downgrades them to zero results.
pub fn parse_search_response(body: &str) -> Result<SearchData, ApiError> {
    let envelope: SearchEnvelope = serde_json::from_str(body)?;
    if envelope.code != 200 || envelope.status != "success" {
        return Err(ApiError::Rejected {
            code: envelope.code,
            status: envelope.status,
        });
    }
    Ok(envelope.data.unwrap_or_default())
}

/// Parse a detail response body.
pub fn parse_detail_response(body: &str) -> Result<Expediente, ApiError> {
    let envelope: DetailEnvelope = serde_json::from_str(body)?;
    if envelope.code != 200 {
        return Err(ApiError::Rejected {
            code: envelope.code,
            status: String::new(),
        });
    }
    Ok(envelope.data.unwrap_or_default())
}

/// Merge a search summary and its detail payload into a canonical record,
/// stamping `scraped_at` at merge time.
pub fn merge_project(
    summary: &ProjectSummary,
    detail: Option<&Expediente>,
    term: &str,
) -> LawRecord {
    let general = detail.and_then(|d| d.general.as_ref());
    let sumilla = general.and_then(|g| g.sumilla.as_deref()).unwrap_or("");

    let url = match (summary.per_par_id, summary.pley_num.as_deref()) {
        (Some(period), Some(number)) => {
            format!("{PORTAL_URL}/#/expediente/main/{period}/{number}")
        }
        _ => PORTAL_URL.to_string(),
    };

    let content_snippet = if sumilla.is_empty() {
        summary.titulo.clone().unwrap_or_default()
    } else {
        sumilla.to_string()
    };
    let content_snippet: String = content_snippet.chars().take(SNIPPET_MAX_CHARS).collect();

    LawRecord {
        search_term_used: term.to_string(),
        // the API filters server-side and does not report which terms hit
        found_terms: Vec::new(),
        url,
        title: non_empty_or(summary.titulo.clone(), NOT_AVAILABLE),
        law_number: non_empty_or(summary.proyecto_ley.clone(), NOT_AVAILABLE),
        date: non_empty_or(summary.fec_presentacion.clone(), NOT_AVAILABLE),
        status: non_empty_or(summary.des_estado.clone(), NOT_AVAILABLE),
        summary: truncate_summary(sumilla),
        authors: non_empty_or(summary.autores.clone(), ""),
        proponent: non_empty_or(summary.des_proponente.clone(), ""),
        committees: detail
            .map(|d| {
                d.comisiones
                    .iter()
                    .filter_map(|c| c.nombre.clone())
                    .collect()
            })
            .unwrap_or_default(),
        period: non_empty_or(general.and_then(|g| g.des_per_par_abrev.clone()), ""),
        legislature: non_empty_or(general.and_then(|g| g.des_legis.clone()), ""),
        content_snippet,
        year_range: Era::Current.year_range().to_string(),
        scraped_at: Utc::now().to_rfc3339(),
    }
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Headers the portal backend expects from its own frontend.
pub fn api_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(REFERER, HeaderValue::from_static("https://wb2server.congreso.gob.pe/spley-portal/"));
    headers.insert(ORIGIN, HeaderValue::from_static("https://wb2server.congreso.gob.pe"));
    headers.insert("Sec-Fetch-Dest", HeaderValue::from_static("empty"));
    headers.insert("Sec-Fetch-Mode", HeaderValue::from_static("cors"));
    headers.insert("Sec-Fetch-Site", HeaderValue::from_static("same-origin"));
    headers
}

/// Thin async wrapper pairing the pure parsing with the shared HTTP client.
pub struct ApiClient<'a> {
    http: &'a HttpClient,
    page_size: u32,
}

impl<'a> ApiClient<'a> {
    pub fn new(http: &'a HttpClient, page_size: u32) -> Self {
        Self { http, page_size }
    }

    /// Search one term. Transport failures and envelope rejections are
    /// logged and yield an empty list.
    pub async fn search(&self, term: &str) -> Vec<ProjectSummary> {
        let payload = SearchPayload::for_term(term, self.page_size);
        let response = match self
            .http
            .post_json(SEARCH_API, &payload, Some(api_headers()))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("search failed for '{term}': {e:#}");
                return Vec::new();
            }
        };
        if !response.is_success() {
            warn!("search for '{term}' returned HTTP {}", response.status);
            return Vec::new();
        }

        let body = String::from_utf8_lossy(&response.body);
        match parse_search_response(&body) {
            Ok(data) => {
                debug!(
                    "search '{term}': {} of {} projects",
                    data.proyectos.len(),
                    data.rows_total
                );
                data.proyectos
            }
            Err(e) => {
                warn!("search for '{term}' rejected: {e}");
                Vec::new()
            }
        }
    }

    /// Fetch and merge the detail record for one project summary, or skip
    /// it when the detail endpoint fails.
    pub async fn fetch_details(&self, summary: &ProjectSummary, term: &str) -> Option<LawRecord> {
        let period = summary.per_par_id?;
        let number = summary.pley_num.as_deref()?;
        let url = format!("{DETAIL_API}/{period}/{number}");

        let response = match self.http.get(&url, Some(api_headers())).await {
            Ok(response) => response,
            Err(e) => {
                warn!("detail fetch failed for {url}: {e:#}");
                return None;
            }
        };
        if !response.is_success() {
            warn!("detail fetch for {url} returned HTTP {}", response.status);
            return None;
        }

        let body = String::from_utf8_lossy(&response.body);
        match parse_detail_response(&body) {
            Ok(detail) => Some(merge_project(summary, Some(&detail), term)),
            Err(e) => {
                warn!("detail response for {url} rejected: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_serializes_with_camel_case_and_nulls() {
        let payload = SearchPayload::for_term("identidad de género", 50);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["perParId"], 2021);
        assert_eq!(json["palabras"], "identidad de género");
        assert_eq!(json["pageSize"], 50);
        assert_eq!(json["rowStart"], 0);
        assert!(json["comisionId"].is_null());
        assert!(json["fecPresentacionDesde"].is_null());
    }

    #[test]
    fn successful_envelope_yields_projects() {
        let body = r#"{
            "code": 200, "status": "success",
            "data": {"proyectos": [
                {"perParId": 2021, "pleyNum": "123", "proyectoLey": "00123/2021-CR", "titulo": "Ley X"}
            ], "rowsTotal": 1}
        }"#;
        let data = parse_search_response(body).unwrap();
        assert_eq!(data.rows_total, 1);
        assert_eq!(data.proyectos.len(), 1);
        assert_eq!(data.proyectos[0].pley_num.as_deref(), Some("123"));
    }

    #[test]
    fn rejected_envelope_is_an_error_not_a_panic() {
        let body = r#"{"code": 500, "status": "error", "data": null}"#;
        assert!(matches!(
            parse_search_response(body),
            Err(ApiError::Rejected { code: 500, .. })
        ));
    }

    #[test]
    fn numeric_pley_num_is_normalized_to_string() {
        let body = r#"{
            "code": 200, "status": "success",
            "data": {"proyectos": [{"perParId": 2021, "pleyNum": 123}], "rowsTotal": 1}
        }"#;
        let data = parse_search_response(body).unwrap();
        assert_eq!(data.proyectos[0].pley_num.as_deref(), Some("123"));
    }

    #[test]
    fn merge_maps_detail_fields_into_the_canonical_schema() {
        let summary = ProjectSummary {
            per_par_id: Some(2021),
            pley_num: Some("123".to_string()),
            proyecto_ley: Some("00123/2021-CR".to_string()),
            titulo: Some("Ley X".to_string()),
            ..ProjectSummary::default()
        };
        let detail: Expediente = serde_json::from_str(
            r#"{"general": {"sumilla": "resumen"}, "comisiones": []}"#,
        )
        .unwrap();

        let record = merge_project(&summary, Some(&detail), "gay");
        assert_eq!(record.law_number, "00123/2021-CR");
        assert_eq!(record.summary, "resumen");
        assert!(record.committees.is_empty());
        assert_eq!(record.title, "Ley X");
        assert_eq!(record.date, NOT_AVAILABLE);
        assert_eq!(record.year_range, "2021+");
        assert!(record
            .url
            .ends_with("/#/expediente/main/2021/123"));
    }

    #[test]
    fn merge_without_detail_still_fills_every_field() {
        let record = merge_project(&ProjectSummary::default(), None, "queer");
        assert_eq!(record.title, NOT_AVAILABLE);
        assert_eq!(record.summary, "");
        assert!(record.committees.is_empty());
        assert_eq!(record.search_term_used, "queer");
        assert!(!record.scraped_at.is_empty());
    }
}
