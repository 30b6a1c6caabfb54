//! Multi-strategy timeline fetcher for X/Twitter
//!
//! Core pipeline: the ordered acquisition strategies ([`sources`]), the
//! normalization layer mapping each strategy's raw output into the
//! canonical [`post::Post`] ([`normalize`]), and the fallback orchestrator
//! that walks the strategies first-success-wins ([`resolver`]).

pub mod config;
pub mod error;
pub mod http_client;
pub mod normalize;
pub mod post;
pub mod report;
pub mod resolver;
pub mod sources;
