//! Scrape API strategy
//!
//! Second-priority strategy, used when no mirror API is configured. The
//! upstream service exposes a user timeline as a lazy, unbounded cursor-
//! paginated stream; this adapter is the finite consumer, enforcing the
//! `limit` cutoff itself because the producer never does.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::{PostSource, SourceMetadata};
use crate::error::{HarvestError, Result};
use crate::normalize;
use crate::post::Post;

/// One timeline item as the scrape API serves it. Typed contract: a page
/// that fails to deserialize fails the whole attempt, there is no per-item
/// skip path here.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeItem {
    pub id: u64,
    #[serde(rename = "rawContent")]
    pub raw_content: Option<String>,
    pub content: Option<String>,
    pub date: String,
    pub url: Option<String>,
    pub user: ScrapeUser,
    #[serde(rename = "likeCount")]
    pub like_count: Option<u64>,
    #[serde(rename = "retweetCount")]
    pub retweet_count: Option<u64>,
    #[serde(rename = "replyCount")]
    pub reply_count: Option<u64>,
    #[serde(rename = "quoteCount")]
    pub quote_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeUser {
    pub username: String,
    pub displayname: Option<String>,
    pub id: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ScrapePage {
    items: Vec<ScrapeItem>,
    next_cursor: Option<String>,
}

pub struct ScrapeApiSource {
    client: Client,
    base_url: String,
    metadata: SourceMetadata,
}

impl ScrapeApiSource {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let metadata = SourceMetadata {
            id: "scrape_api".to_string(),
            name: "Scrape API".to_string(),
            description: "Lazy cursor-paginated user timeline stream".to_string(),
        };

        Self {
            client,
            base_url: base_url.into(),
            metadata,
        }
    }

    async fn fetch_page(&self, username: &str, cursor: Option<&str>) -> Result<ScrapePage> {
        let url = format!("{}/items/{}", self.base_url, username);

        debug!(source = "scrape_api", url = %url, cursor = ?cursor, "Fetching timeline page");

        // Cursors are opaque upstream tokens; the query builder encodes them
        let mut request = self.client.get(&url);
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::HttpStatus { status, url });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl PostSource for ScrapeApiSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    async fn fetch(&self, username: &str, limit: usize) -> Result<Vec<Post>> {
        if limit == 0 {
            return Ok(vec![]);
        }

        let mut posts = Vec::with_capacity(limit);
        let mut cursor: Option<String> = None;

        loop {
            let page = self.fetch_page(username, cursor.as_deref()).await?;

            for item in &page.items {
                if posts.len() >= limit {
                    break;
                }
                posts.push(normalize::from_scrape_item(item));
            }

            if posts.len() >= limit {
                break;
            }
            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        if posts.is_empty() {
            return Err(HarvestError::NoPosts(username.to_string()));
        }

        info!(
            source = "scrape_api",
            username = %username,
            posts = posts.len(),
            "Fetched user timeline"
        );

        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn item(id: u64) -> serde_json::Value {
        json!({
            "id": id,
            "rawContent": format!("post {id}"),
            "content": format!("post {id} (rendered)"),
            "date": "2024-01-15T09:58:00+00:00",
            "url": format!("https://twitter.com/jack/status/{id}"),
            "user": {"username": "jack", "displayname": "Jack", "id": 12},
            "likeCount": 5,
            "retweetCount": 1,
            "replyCount": 0,
            "quoteCount": 0
        })
    }

    #[tokio::test]
    async fn stops_at_limit_even_though_the_stream_offers_more() {
        let server = MockServer::start().await;
        // First page always advertises another one; the adapter must not
        // follow the cursor once it has enough items.
        Mock::given(method("GET"))
            .and(path("/items/jack"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [item(1), item(2), item(3)],
                "next_cursor": "page-2"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let source = ScrapeApiSource::new(Client::new(), server.uri());
        let posts = source.fetch("jack", 2).await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].text, "post 1");
        assert_eq!(posts[0].metrics.likes, 5);
    }

    #[tokio::test]
    async fn follows_the_cursor_until_limit_is_reached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items/jack"))
            .and(query_param("cursor", "page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [item(3), item(4)],
                "next_cursor": null
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/items/jack"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [item(1), item(2)],
                "next_cursor": "page-2"
            })))
            .mount(&server)
            .await;

        let source = ScrapeApiSource::new(Client::new(), server.uri());
        let posts = source.fetch("jack", 3).await.unwrap();

        assert_eq!(posts.len(), 3);
        assert_eq!(posts[2].id, "3");
    }

    #[tokio::test]
    async fn cursor_with_reserved_characters_survives_as_one_query_param() {
        let server = MockServer::start().await;
        // The opaque cursor carries '&' and '='; without percent-encoding it
        // would split into extra query parameters and never match here.
        Mock::given(method("GET"))
            .and(path("/items/jack"))
            .and(query_param("cursor", "a&b=c"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [item(2)],
                "next_cursor": null
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/items/jack"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [item(1)],
                "next_cursor": "a&b=c"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let source = ScrapeApiSource::new(Client::new(), server.uri());
        let posts = source.fetch("jack", 2).await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].id, "2");
    }

    #[tokio::test]
    async fn exhausted_stream_with_no_items_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items/ghost"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [],
                "next_cursor": null
            })))
            .mount(&server)
            .await;

        let source = ScrapeApiSource::new(Client::new(), server.uri());
        let err = source.fetch("ghost", 5).await.unwrap_err();
        assert!(matches!(err, HarvestError::NoPosts(_)));
    }

    #[tokio::test]
    async fn limit_zero_returns_empty_without_error() {
        let source = ScrapeApiSource::new(Client::new(), "http://127.0.0.1:1");
        assert!(source.fetch("jack", 0).await.unwrap().is_empty());
    }
}
