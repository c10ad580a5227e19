//! Sequential per-term sweep against the modern spley-portal API.

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::domain::era::Era;
use crate::domain::law_record::LawRecord;
use crate::infrastructure::api::ApiClient;
use crate::infrastructure::config::ScraperConfig;
use crate::infrastructure::http_client::HttpClient;

pub struct ApiSweepEngine<'a> {
    client: ApiClient<'a>,
}

impl<'a> ApiSweepEngine<'a> {
    pub fn new(http: &'a HttpClient, config: &ScraperConfig) -> Self {
        Self {
            client: ApiClient::new(http, config.search_page_size),
        }
    }

    /// Same ordering contract as the legacy sweep: one term fully processed
    /// before the next, a pause after every detail fetch and every term.
    pub async fn run(&self, search_terms: &[&str], cancel: &CancellationToken) -> Vec<LawRecord> {
        info!(
            "starting API sweep for {} ({} terms)",
            Era::Current.year_range(),
            search_terms.len()
        );
        let mut records = Vec::new();

        for (index, term) in search_terms.iter().enumerate() {
            if cancel.is_cancelled() {
                warn!("API sweep interrupted, keeping {} records", records.len());
                break;
            }
            info!("term {}/{}: {term}", index + 1, search_terms.len());

            let projects = self.client.search(term).await;
            if !projects.is_empty() {
                info!("  found {} projects", projects.len());
            }

            for project in &projects {
                if cancel.is_cancelled() {
                    warn!("interrupted between detail fetches");
                    break;
                }
                if let Some(record) = self.client.fetch_details(project, term).await {
                    info!(
                        "    ✓ {}: {}",
                        record.law_number,
                        record.title.chars().take(60).collect::<String>()
                    );
                    records.push(record);
                }
                sleep(Era::Current.page_delay()).await;
            }

            sleep(Era::Current.term_delay()).await;
        }

        info!("API sweep finished with {} records", records.len());
        records
    }
}
