//! Mirror API strategy
//!
//! Highest-priority strategy. Talks to a JSON service that proxies through
//! public mirror instances of the platform front-end and answers user
//! timelines as `{"tweets": [...]}` with a loose item shape (`tweet_id,
//! text, date, link, name, user_id, likes, retweets, comments`). Richer
//! than the document fallback: real metrics and real timestamps.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use super::{PostSource, SourceMetadata};
use crate::error::{HarvestError, Result};
use crate::normalize;
use crate::post::Post;

pub struct MirrorApiSource {
    client: Client,
    base_url: String,
    metadata: SourceMetadata,
}

impl MirrorApiSource {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let metadata = SourceMetadata {
            id: "mirror_api".to_string(),
            name: "Mirror API".to_string(),
            description: "User timelines proxied through public mirror instances".to_string(),
        };

        Self {
            client,
            base_url: base_url.into(),
            metadata,
        }
    }
}

#[async_trait]
impl PostSource for MirrorApiSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    async fn fetch(&self, username: &str, limit: usize) -> Result<Vec<Post>> {
        if limit == 0 {
            return Ok(vec![]);
        }

        let url = format!(
            "{}/api/tweets/{}?mode=user&number={}",
            self.base_url, username, limit
        );

        debug!(source = "mirror_api", url = %url, "Fetching user timeline");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::HttpStatus { status, url });
        }

        let body: Value = response.json().await?;
        let captured_at = Utc::now().to_rfc3339();

        let posts: Vec<Post> = body
            .get("tweets")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .take(limit)
                    .map(|item| normalize::from_mirror_item(item, username, &captured_at))
                    .collect()
            })
            .unwrap_or_default();

        if posts.is_empty() {
            return Err(HarvestError::NoPosts(username.to_string()));
        }

        info!(
            source = "mirror_api",
            username = %username,
            posts = posts.len(),
            "Fetched user timeline"
        );

        Ok(posts)
    }
}
