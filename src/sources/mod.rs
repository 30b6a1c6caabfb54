//! Acquisition strategies
//!
//! Each strategy implements the `PostSource` trait. All of them are
//! best-effort and independently unreliable; the resolver tries them in
//! priority order and takes the first non-empty batch.

pub mod html_mirror;
pub mod mirror_api;
pub mod scrape_api;

use async_trait::async_trait;

use crate::error::Result;
use crate::post::Post;

/// Metadata about a strategy
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    /// Unique identifier, used as the `source_strategy` tag and in
    /// aggregated failure messages
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Description
    pub description: String,
}

/// Trait for all acquisition strategies
///
/// `fetch` returns at most `limit` posts. A strategy that produced zero
/// posts for a positive limit returns `Err`, never an empty `Ok`; for
/// `limit == 0` it returns an empty `Ok` without touching the network.
/// No error escapes as a panic; every failure mode maps to `HarvestError`.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Gets metadata about this strategy
    fn metadata(&self) -> &SourceMetadata;

    /// Fetches up to `limit` recent posts for `username`
    async fn fetch(&self, username: &str, limit: usize) -> Result<Vec<Post>>;

    /// Gets the strategy id
    fn id(&self) -> &str {
        &self.metadata().id
    }
}

pub use html_mirror::HtmlMirrorSource;
pub use mirror_api::MirrorApiSource;
pub use scrape_api::ScrapeApiSource;
