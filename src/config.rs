//! Configuration for the timeline fetcher
//!
//! Everything is environment-driven with sensible defaults; a `.env` file is
//! honored for local runs. Which acquisition strategies are available is
//! decided here, once, at process start.

use anyhow::Result;
use serde::Deserialize;
use url::Url;

use crate::error::HarvestError;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// JSON mirror API endpoint (highest-priority strategy when set)
    pub mirror_api_url: Option<String>,

    /// Cursor-paginated scrape API endpoint (used when no mirror API is set)
    pub scrape_api_url: Option<String>,

    /// Comma-separated public mirror front-end base URLs for the document
    /// fallback, tried in order
    #[serde(default = "default_mirror_instances")]
    pub mirror_instances: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_mirror_instances() -> String {
    [
        "https://nitter.net",
        "https://nitter.poast.org",
        "https://nitter.privacydev.net",
    ]
    .join(",")
}

fn default_request_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file
        dotenvy::dotenv().ok();

        // Build config from environment
        let config = config::Config::builder()
            .add_source(config::Environment::default().try_parsing(true))
            .build()?;

        let cfg: Config = config.try_deserialize()?;
        Ok(cfg)
    }

    /// Validates that every configured endpoint is a parseable URL
    pub fn validate(&self) -> Result<(), HarvestError> {
        for url in self
            .mirror_api_url
            .iter()
            .chain(self.scrape_api_url.iter())
            .map(String::as_str)
            .chain(self.mirror_instance_list())
        {
            Url::parse(url)
                .map_err(|e| HarvestError::Validation(format!("{url}: {e}")))?;
        }
        Ok(())
    }

    /// Checks if the mirror API strategy is available
    pub fn has_mirror_api(&self) -> bool {
        self.mirror_api_url.is_some()
    }

    /// Checks if the scrape API strategy is available
    pub fn has_scrape_api(&self) -> bool {
        self.scrape_api_url.is_some()
    }

    /// Ordered mirror base URLs for the document fallback
    pub fn mirror_instance_list(&self) -> impl Iterator<Item = &str> {
        self.mirror_instances
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mirror_api_url: None,
            scrape_api_url: None,
            mirror_instances: default_mirror_instances(),
            request_timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}
