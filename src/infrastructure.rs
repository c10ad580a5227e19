//! Infrastructure layer: HTTP transport, per-era HTML extraction, the
//! modern-API client, export writers, configuration and logging.

pub mod api;
pub mod config;
pub mod encoding;
pub mod export;
pub mod html_repair;
pub mod http_client;
pub mod logging;
pub mod parsing;

pub use config::ScraperConfig;
pub use export::Exporter;
pub use http_client::{FetchResponse, HttpClient, HttpClientConfig};
pub use logging::init_logging;
pub use parsing::{EraExtractor, FieldSet};
