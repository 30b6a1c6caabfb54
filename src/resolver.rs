//! Fallback orchestration
//!
//! Holds the ordered strategy list, decided once at startup from what the
//! configuration makes available, and walks it strictly sequentially:
//! first strategy to produce a non-empty batch wins and nothing below it is
//! ever invoked. Results are never merged across strategies.

use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{HarvestError, Result};
use crate::post::Post;
use crate::sources::{HtmlMirrorSource, MirrorApiSource, PostSource, ScrapeApiSource};

/// Result of one resolution run
#[derive(Debug)]
pub struct ResolveOutcome {
    /// Posts from the winning strategy; empty on total exhaustion
    pub posts: Vec<Post>,
    /// One reason per failed strategy attempt, in attempt order
    pub failures: Vec<String>,
}

impl ResolveOutcome {
    /// Joined diagnostic message for the stderr payload
    pub fn failure_message(&self) -> String {
        if self.failures.is_empty() {
            "All scraping methods failed".to_string()
        } else {
            self.failures.join("; ")
        }
    }
}

pub struct Resolver {
    sources: Vec<Arc<dyn PostSource>>,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field(
                "sources",
                &self.sources.iter().map(|s| s.id().to_string()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Resolver {
    /// Builds the strategy priority order from the configuration.
    ///
    /// Mirror API configured: `[mirror_api, html_mirror]`. Otherwise scrape
    /// API configured: `[scrape_api, html_mirror]`. Otherwise the document
    /// fallback alone. With no mirror instances and no API endpoints there
    /// is no strategy at all, which is the environment-error case.
    pub fn from_config(config: &Config, client: Client) -> Result<Self> {
        let mut sources: Vec<Arc<dyn PostSource>> = Vec::new();

        if let Some(ref url) = config.mirror_api_url {
            sources.push(Arc::new(MirrorApiSource::new(client.clone(), url.clone())));
        } else if let Some(ref url) = config.scrape_api_url {
            sources.push(Arc::new(ScrapeApiSource::new(client.clone(), url.clone())));
        }

        let instances: Vec<String> = config
            .mirror_instance_list()
            .map(String::from)
            .collect();
        if !instances.is_empty() {
            sources.push(Arc::new(HtmlMirrorSource::new(client, instances)));
        }

        if sources.is_empty() {
            return Err(HarvestError::NoSourceAvailable);
        }

        Ok(Self { sources })
    }

    /// Builds a resolver over an explicit strategy list (tests)
    pub fn with_sources(sources: Vec<Arc<dyn PostSource>>) -> Self {
        Self { sources }
    }

    /// Strategy ids in priority order
    pub fn source_ids(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.id()).collect()
    }

    /// Tries each strategy in order until one yields a non-empty batch.
    ///
    /// The winning batch gets its first post tagged with the strategy id.
    /// `limit == 0` short-circuits: zero posts were requested, which is not
    /// a failure, so no strategy is consulted.
    pub async fn resolve(&self, username: &str, limit: usize) -> ResolveOutcome {
        let mut failures = Vec::new();

        if limit == 0 {
            return ResolveOutcome {
                posts: vec![],
                failures,
            };
        }

        for source in &self.sources {
            debug!(strategy = source.id(), username = %username, "Trying strategy");

            match source.fetch(username, limit).await {
                Ok(mut posts) if !posts.is_empty() => {
                    posts[0].source_strategy = Some(source.id().to_string());
                    return ResolveOutcome { posts, failures };
                }
                // Strategies are contracted to return Err instead of an
                // empty Ok, but an empty batch still counts as a failure.
                Ok(_) => {
                    warn!(strategy = source.id(), "Strategy returned no posts");
                    failures.push(format!("{}: returned no posts", source.id()));
                }
                Err(e) => {
                    warn!(strategy = source.id(), error = %e, "Strategy failed");
                    failures.push(format!("{}: {}", source.id(), e));
                }
            }
        }

        ResolveOutcome {
            posts: vec![],
            failures,
        }
    }
}
