//! Shared HTTP client construction
//!
//! One `reqwest::Client` serves every strategy. The per-request timeout
//! bounds each mirror attempt; on expiry the attempt is treated as a failure
//! for that URL and the next candidate is tried. No retries of the same URL.

use std::time::Duration;

use reqwest::Client;

use crate::config::Config;
use crate::error::Result;

pub fn build_client(config: &Config) -> Result<Client> {
    let timeout = Duration::from_secs(config.request_timeout_secs);

    let client = Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(&config.user_agent)
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_default_config() {
        let config = Config::default();
        assert!(build_client(&config).is_ok());
    }
}
