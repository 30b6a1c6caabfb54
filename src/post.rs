//! Canonical post record
//!
//! Every acquisition strategy normalizes into this shape. All fields are
//! always present; missing source data is defaulted, never omitted.

use serde::{Deserialize, Serialize};

/// Canonical post, independent of which strategy produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Platform post id; `"0"` when the strategy cannot recover it
    pub id: String,
    /// Textual body; empty when unavailable
    pub text: String,
    /// ISO-8601 timestamp; capture time when the true creation time is
    /// unrecoverable (degraded precision, see the document adapter)
    pub created_at: String,
    /// Canonical permalink
    pub url: String,
    pub author: Author,
    pub metrics: PostMetrics,
    /// Set on the first post of the winning batch only; identifies which
    /// strategy produced the result (diagnostic)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_strategy: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub username: String,
    /// Defaults to the username when the source does not expose it
    pub display_name: String,
    /// Defaults to `"0"` when the source does not expose it
    pub author_id: String,
}

/// Engagement metrics; all default to 0 for strategies that cannot see them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostMetrics {
    pub likes: u64,
    pub reposts: u64,
    pub replies: u64,
    pub quotes: u64,
}

impl Post {
    /// Constructs the canonical permalink from username + post id, used when
    /// a strategy does not hand one back directly.
    pub fn permalink(username: &str, id: &str) -> String {
        format!("https://twitter.com/{}/status/{}", username, id)
    }
}
