//! Runtime configuration: defaults tuned for the Congress portals, with an
//! optional JSON override file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::infrastructure::http_client::HttpClientConfig;

/// Scraper configuration. Every field has a sensible default; a config file
/// only needs the keys it wants to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Directory receiving the export artifacts.
    pub output_dir: PathBuf,

    /// Maximum results requested per search (`SearchMax` / `Count` /
    /// API page size).
    pub search_page_size: u32,

    /// Per-request timeout in seconds.
    pub request_timeout_seconds: u64,

    /// Default user agent for portal requests.
    pub user_agent: String,

    /// Rate-limiter floor under the explicit per-page pauses.
    pub max_requests_per_second: u32,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        let http = HttpClientConfig::default();
        Self {
            output_dir: PathBuf::from("data/exports"),
            search_page_size: 100,
            request_timeout_seconds: http.timeout_seconds,
            user_agent: http.user_agent,
            max_requests_per_second: http.max_requests_per_second,
        }
    }
}

impl ScraperConfig {
    /// Load configuration from a JSON file, filling missing keys with
    /// defaults.
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            user_agent: self.user_agent.clone(),
            timeout_seconds: self.request_timeout_seconds,
            max_requests_per_second: self.max_requests_per_second,
        }
    }
}
