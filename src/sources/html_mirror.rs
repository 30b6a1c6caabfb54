//! Direct document strategy
//!
//! Lowest-priority, always-available fallback: fetch a public mirror
//! front-end page for the user and scrape timeline items straight out of
//! the HTML. Lowest fidelity of the three strategies: the lightweight
//! document carries neither engagement metrics nor machine-readable
//! timestamps, so every post comes back with zero metrics and the capture
//! time as `created_at`.

use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info};

use super::{PostSource, SourceMetadata};
use crate::error::{HarvestError, Result};
use crate::normalize;
use crate::post::Post;

static TIMELINE_ITEM: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.timeline-item").unwrap());
static TWEET_CONTENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.tweet-content").unwrap());
static TWEET_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a.tweet-link").unwrap());

pub struct HtmlMirrorSource {
    client: Client,
    instances: Vec<String>,
    metadata: SourceMetadata,
}

impl HtmlMirrorSource {
    pub fn new(client: Client, instances: Vec<String>) -> Self {
        let metadata = SourceMetadata {
            id: "html_mirror".to_string(),
            name: "Mirror HTML".to_string(),
            description: "Timeline items scraped from public mirror front-end pages".to_string(),
        };

        Self {
            client,
            instances,
            metadata,
        }
    }
}

/// Extracts up to `limit` posts from a mirror timeline page.
///
/// Per-item extraction is best-effort: display text defaults to empty and
/// the post id to `"0"` when an item lacks the expected children. The id
/// comes out of the permalink `href` by taking the last `/` segment and
/// stripping the `#m` fragment marker. This rule matches the mirror
/// markup exactly and must not be "improved".
pub(crate) fn parse_timeline(
    html: &str,
    username: &str,
    limit: usize,
    captured_at: &str,
) -> Vec<Post> {
    let document = Html::parse_document(html);

    document
        .select(&TIMELINE_ITEM)
        .take(limit)
        .map(|item| {
            let text = item
                .select(&TWEET_CONTENT)
                .next()
                .map(|e| e.text().collect::<String>().trim().to_string())
                .unwrap_or_default();

            let id = item
                .select(&TWEET_LINK)
                .next()
                .and_then(|e| e.value().attr("href"))
                .and_then(|href| href.split('/').last())
                .map(|segment| segment.replace("#m", ""))
                .unwrap_or_else(|| "0".to_string());

            normalize::from_timeline_item(username, &id, &text, captured_at)
        })
        .collect()
}

#[async_trait]
impl PostSource for HtmlMirrorSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    async fn fetch(&self, username: &str, limit: usize) -> Result<Vec<Post>> {
        if limit == 0 {
            return Ok(vec![]);
        }

        let captured_at = Utc::now().to_rfc3339();

        for base_url in &self.instances {
            let url = format!("{}/{}", base_url, username);
            debug!(source = "html_mirror", url = %url, "Trying mirror instance");

            // One bounded attempt per instance; any transport failure or
            // non-200 moves on to the next base URL, no retry.
            let response = match self.client.get(&url).send().await {
                Ok(response) => response,
                Err(e) => {
                    debug!(source = "html_mirror", url = %url, error = %e, "Instance unreachable");
                    continue;
                }
            };

            if response.status() != reqwest::StatusCode::OK {
                debug!(
                    source = "html_mirror",
                    url = %url,
                    status = %response.status(),
                    "Instance refused"
                );
                continue;
            }

            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(source = "html_mirror", url = %url, error = %e, "Body read failed");
                    continue;
                }
            };

            let posts = parse_timeline(&body, username, limit, &captured_at);
            if !posts.is_empty() {
                info!(
                    source = "html_mirror",
                    instance = %base_url,
                    username = %username,
                    posts = posts.len(),
                    "Scraped user timeline"
                );
                return Ok(posts);
            }
        }

        Err(HarvestError::NoPosts(username.to_string()))
    }
}
