//! Sequential per-term sweep over one legacy era portal.
//!
//! One term is processed fully before the next begins, and a pause follows
//! every detail fetch and every term sweep — deliberate self-throttling
//! toward third-party servers, not a performance knob. Transport and parse
//! failures never escalate past the unit of work that hit them; an
//! interrupted sweep keeps whatever it accumulated.

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::application::normalizer::normalize;
use crate::domain::era::Era;
use crate::domain::law_record::{CandidateLink, LawRecord};
use crate::domain::terms;
use crate::infrastructure::config::ScraperConfig;
use crate::infrastructure::encoding::decode_body;
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::parsing::text_patterns::snippet;
use crate::infrastructure::parsing::{self, EraExtractor};

pub struct SweepEngine<'a> {
    http: &'a HttpClient,
    extractor: Box<dyn EraExtractor>,
    era: Era,
    config: &'a ScraperConfig,
}

impl<'a> SweepEngine<'a> {
    /// Engine for a legacy era, or `None` for the API-backed period.
    pub fn new(http: &'a HttpClient, era: Era, config: &'a ScraperConfig) -> Option<Self> {
        let extractor = parsing::extractor_for(era)?;
        Some(Self {
            http,
            extractor,
            era,
            config,
        })
    }

    /// Sweep every term in order, accumulating records. Cancellation stops
    /// between units of work; accumulated records are returned either way.
    pub async fn run(&self, search_terms: &[&str], cancel: &CancellationToken) -> Vec<LawRecord> {
        info!(
            "starting sweep for {} ({} terms)",
            self.era.year_range(),
            search_terms.len()
        );
        let mut records = Vec::new();

        for (index, term) in search_terms.iter().enumerate() {
            if cancel.is_cancelled() {
                warn!("sweep interrupted, keeping {} records", records.len());
                break;
            }
            info!("term {}/{}: {term}", index + 1, search_terms.len());
            let processed = self.sweep_term(term, &mut records, cancel).await;
            debug!("term '{term}' yielded {processed} records");
            sleep(self.era.term_delay()).await;
        }

        info!(
            "sweep for {} finished with {} records",
            self.era.year_range(),
            records.len()
        );
        records
    }

    /// One term: search, discover, process each detail page. Returns the
    /// number of records produced; any failure is a zero-result for the
    /// unit that hit it.
    async fn sweep_term(
        &self,
        term: &str,
        records: &mut Vec<LawRecord>,
        cancel: &CancellationToken,
    ) -> usize {
        let Some(search_url) = self.era.search_url(term, self.config.search_page_size) else {
            return 0;
        };

        let response = match self.http.get(&search_url, None).await {
            Ok(response) => response,
            Err(e) => {
                warn!("search failed for '{term}': {e:#}");
                return 0;
            }
        };
        if !response.is_success() {
            warn!("search for '{term}' returned HTTP {}", response.status);
            return 0;
        }

        let html = decode_body(&response.body, response.charset.as_deref());
        let links = self.extractor.discover_links(&html, term);
        if links.is_empty() {
            debug!("no detail links for '{term}'");
            return 0;
        }
        info!("  found {} detail links", links.len());

        let mut processed = 0;
        for link in &links {
            if cancel.is_cancelled() {
                warn!("interrupted between detail pages");
                break;
            }
            if self.process_detail(link, term, records).await {
                processed += 1;
            }
            sleep(self.era.page_delay()).await;
        }
        processed
    }

    /// Fetch, repair, extract and normalize one detail page.
    async fn process_detail(
        &self,
        link: &CandidateLink,
        term: &str,
        records: &mut Vec<LawRecord>,
    ) -> bool {
        let extra_headers = self
            .era
            .uses_minimal_agent()
            .then(HttpClient::minimal_agent_headers);

        let response = match self.http.get(&link.url, extra_headers).await {
            Ok(response) => response,
            Err(e) => {
                warn!("failed to fetch {}: {e:#}", link.url);
                return false;
            }
        };
        if !response.is_success() {
            warn!("detail page {} returned HTTP {}", link.url, response.status);
            return false;
        }

        let body = decode_body(&response.body, response.charset.as_deref());
        let repaired = self.extractor.repair_markup(body);
        let page_text = parsing::page_text(&repaired).to_lowercase();

        let found_terms = terms::found_in(&page_text);
        if !self.extractor.is_relevant(&page_text, term) {
            debug!("skipping {}: no term match on page", link.url);
            return false;
        }

        let fields = self.extractor.extract_fields(&repaired, &link.url);

        let mut snippet_terms = found_terms.clone();
        snippet_terms.push(term.to_string());
        let content_snippet = snippet(&page_text, &snippet_terms);

        let record = normalize(link, fields, term, found_terms, content_snippet, self.era);
        info!(
            "    ✓ {}: {}",
            record.law_number,
            record.title.chars().take(60).collect::<String>()
        );
        records.push(record);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_exists_for_every_legacy_era() {
        let http = HttpClient::new(Default::default()).unwrap();
        let config = ScraperConfig::default();
        for era in Era::ALL {
            let engine = SweepEngine::new(&http, era, &config);
            assert_eq!(engine.is_some(), era.is_legacy());
        }
    }
}
