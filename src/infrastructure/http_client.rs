//! HTTP client for the Congress portals with rate limiting and per-call
//! header overrides.
//!
//! Transport failures are never fatal to a run: callers treat an `Err` or a
//! non-2xx status as a zero-result outcome and move on. The client exposes
//! the declared response charset so the extraction layer can re-decode
//! Latin-1 bodies correctly.

use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{Context, Result};
use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use serde::Serialize;

/// HTTP client configuration for the sweep.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_requests_per_second: u32,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            timeout_seconds: 15,
            max_requests_per_second: 2,
        }
    }
}

/// Raw response handed to the extraction layer.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
    /// Charset declared in the Content-Type header, if any.
    pub charset: Option<String>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Rate-limited HTTP client shared by every era engine.
pub struct HttpClient {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    config: HttpClientConfig,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("invalid user agent")?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("es-ES,es;q=0.9,en;q=0.8"),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("failed to create HTTP client")?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.max_requests_per_second)
                .context("rate limit must be greater than 0")?,
        );

        Ok(Self {
            client,
            rate_limiter: RateLimiter::direct(quota),
            config,
        })
    }

    /// Headers matching a bare curl invocation. The three oldest portals
    /// serve truncated bodies to browser user agents.
    pub fn minimal_agent_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("curl/8.7.1"));
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers
    }

    /// Fetch a URL, optionally overriding headers for this call only.
    pub async fn get(&self, url: &str, extra_headers: Option<HeaderMap>) -> Result<FetchResponse> {
        self.rate_limiter.until_ready().await;
        tracing::debug!("GET {url}");

        let mut request = self.client.get(url);
        if let Some(headers) = extra_headers {
            request = request.headers(headers);
        }
        let response = request
            .send()
            .await
            .with_context(|| format!("failed to fetch {url}"))?;

        Self::into_fetch_response(response).await
    }

    /// POST a JSON payload, optionally overriding headers for this call.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        payload: &T,
        extra_headers: Option<HeaderMap>,
    ) -> Result<FetchResponse> {
        self.rate_limiter.until_ready().await;
        tracing::debug!("POST {url}");

        let mut request = self.client.post(url).json(payload);
        if let Some(headers) = extra_headers {
            request = request.headers(headers);
        }
        let response = request
            .send()
            .await
            .with_context(|| format!("failed to post to {url}"))?;

        Self::into_fetch_response(response).await
    }

    async fn into_fetch_response(response: reqwest::Response) -> Result<FetchResponse> {
        let status = response.status().as_u16();
        let charset = charset_from_headers(response.headers());
        let body = response
            .bytes()
            .await
            .context("failed to read response body")?
            .to_vec();
        Ok(FetchResponse {
            status,
            body,
            charset,
        })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

fn charset_from_headers(headers: &HeaderMap) -> Option<String> {
    let content_type = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    content_type.split(';').skip(1).find_map(|part| {
        let part = part.trim();
        let lower = part.to_ascii_lowercase();
        lower
            .strip_prefix("charset=")
            .map(|value| value.trim_matches('"').to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation_succeeds_with_defaults() {
        let client = HttpClient::new(HttpClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn charset_is_extracted_from_content_type() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=ISO-8859-1"),
        );
        assert_eq!(
            charset_from_headers(&headers).as_deref(),
            Some("iso-8859-1")
        );
    }

    #[test]
    fn missing_charset_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
        assert_eq!(charset_from_headers(&headers), None);
    }

    #[test]
    fn minimal_agent_headers_match_curl() {
        let headers = HttpClient::minimal_agent_headers();
        assert_eq!(headers.get(USER_AGENT).unwrap(), "curl/8.7.1");
        assert_eq!(headers.get(ACCEPT).unwrap(), "*/*");
    }
}
