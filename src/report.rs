//! JSON envelopes for stdout and stderr
//!
//! stdout always carries the run report (even a zero-post run is a
//! successful run at the process level); stderr carries an error payload
//! only on total exhaustion, environment errors, or a missing username.

use serde::Serialize;

use crate::post::Post;

/// Success envelope printed to stdout
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub success: bool,
    pub username: String,
    pub count: usize,
    pub tweets: Vec<Post>,
    /// RFC 3339 capture time of the run
    pub timestamp: String,
}

impl RunReport {
    pub fn new(username: &str, tweets: Vec<Post>, timestamp: String) -> Self {
        Self {
            success: true,
            username: username.to_string(),
            count: tweets.len(),
            tweets,
            timestamp,
        }
    }
}

/// Error envelope; printed to stdout for usage errors, stderr otherwise
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub error: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            username: None,
        }
    }

    pub fn for_user(message: impl Into<String>, username: &str) -> Self {
        Self {
            error: true,
            message: message.into(),
            username: Some(username.to_string()),
        }
    }
}
