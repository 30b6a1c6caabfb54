//! Record normalizer
//!
//! Pure mapping from each strategy's native item shape to the canonical
//! [`Post`]. Missing optional data is defaulted, never escalated: these
//! functions cannot fail. Each strategy documents its own degradations
//! (the document fallback, for example, has no metrics and only a capture
//! timestamp).

use serde_json::Value;

use crate::post::{Author, Post, PostMetrics};
use crate::sources::scrape_api::ScrapeItem;

/// Maps one item from the mirror API's loose `tweets` array.
///
/// Contract fields: `tweet_id, text, date, link, name, user_id, likes,
/// retweets, comments`. Any of them may be absent. The mirror API does not
/// expose quote counts, so `quotes` is always 0.
pub fn from_mirror_item(item: &Value, username: &str, captured_at: &str) -> Post {
    let id = string_field(item, "tweet_id").unwrap_or_else(|| "0".to_string());

    Post {
        url: string_field(item, "link")
            .unwrap_or_else(|| Post::permalink(username, &id)),
        text: string_field(item, "text").unwrap_or_default(),
        created_at: string_field(item, "date")
            .unwrap_or_else(|| captured_at.to_string()),
        author: Author {
            username: username.to_string(),
            display_name: string_field(item, "name")
                .unwrap_or_else(|| username.to_string()),
            author_id: string_field(item, "user_id")
                .unwrap_or_else(|| "0".to_string()),
        },
        metrics: PostMetrics {
            likes: count_field(item, "likes"),
            reposts: count_field(item, "retweets"),
            replies: count_field(item, "comments"),
            quotes: 0,
        },
        id,
        source_strategy: None,
    }
}

/// Maps one typed item from the scrape API stream.
///
/// Structure is guaranteed by deserialization, so there is no skip path
/// here; only optional fields get defaulted. Prefers the raw content over
/// the rendered display content when both exist.
pub fn from_scrape_item(item: &ScrapeItem) -> Post {
    let id = item.id.to_string();
    let username = item.user.username.clone();

    Post {
        url: item
            .url
            .clone()
            .unwrap_or_else(|| Post::permalink(&username, &id)),
        text: item
            .raw_content
            .clone()
            .or_else(|| item.content.clone())
            .unwrap_or_default(),
        created_at: item.date.clone(),
        author: Author {
            display_name: item
                .user
                .displayname
                .clone()
                .unwrap_or_else(|| username.clone()),
            author_id: item
                .user
                .id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "0".to_string()),
            username,
        },
        metrics: PostMetrics {
            likes: item.like_count.unwrap_or(0),
            reposts: item.retweet_count.unwrap_or(0),
            replies: item.reply_count.unwrap_or(0),
            quotes: item.quote_count.unwrap_or(0),
        },
        id,
        source_strategy: None,
    }
}

/// Maps one timeline element extracted from a mirror HTML page.
///
/// The lightweight document exposes neither engagement metrics nor the true
/// creation time: metrics are zero and the capture time stands in for
/// `created_at`.
pub fn from_timeline_item(username: &str, id: &str, text: &str, captured_at: &str) -> Post {
    Post {
        id: id.to_string(),
        text: text.to_string(),
        created_at: captured_at.to_string(),
        url: Post::permalink(username, id),
        author: Author {
            username: username.to_string(),
            display_name: username.to_string(),
            author_id: "0".to_string(),
        },
        metrics: PostMetrics::default(),
        source_strategy: None,
    }
}

/// Reads a field as a string, accepting numeric ids as well
fn string_field(item: &Value, key: &str) -> Option<String> {
    match item.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn count_field(item: &Value, key: &str) -> u64 {
    item.get(key).and_then(Value::as_u64).unwrap_or(0)
}
