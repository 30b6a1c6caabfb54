//! tweet-harvest
//! Multi-strategy timeline fetcher for X/Twitter, no API tokens required
//!
//! Tries the configured acquisition strategies in priority order (mirror
//! API, scrape API, raw mirror HTML) and emits the first non-empty batch of
//! posts as JSON on stdout. Total exhaustion is reported as a structured
//! payload on stderr while stdout still carries an empty, well-formed run
//! report.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tweet_harvest::config::Config;
use tweet_harvest::http_client;
use tweet_harvest::report::{ErrorReport, RunReport};
use tweet_harvest::resolver::Resolver;

const USAGE: &str = "Usage: tweet-harvest <username> [limit]";

/// Multi-strategy timeline fetcher for X/Twitter
#[derive(Parser, Debug)]
#[command(name = "tweet-harvest")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch the most recent posts for a username without an API token")]
struct Cli {
    /// Target username, without the leading @
    username: Option<String>,

    /// Number of recent posts to fetch
    #[arg(default_value_t = 5)]
    limit: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, default_value = "false")]
    json_logs: bool,

    /// Exit non-zero when every strategy is exhausted
    #[arg(long)]
    strict: bool,
}

/// Sets up structured logging with tracing.
///
/// Logs go to stderr: stdout is reserved for the machine-parsable run
/// report.
fn setup_logging(log_level: &str, json_output: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

fn print_stdout<T: serde::Serialize>(payload: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(payload)?);
    Ok(())
}

fn print_stderr<T: serde::Serialize>(payload: &T) -> Result<()> {
    eprintln!("{}", serde_json::to_string(payload)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(&cli.log_level, cli.json_logs);

    let Some(username) = cli.username else {
        // Argument validation failure goes to stdout, matching the
        // documented CLI contract.
        print_stdout(&ErrorReport::new(USAGE))?;
        std::process::exit(1);
    };

    let correlation_id = uuid::Uuid::new_v4().to_string();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        correlation_id = %correlation_id,
        username = %username,
        limit = cli.limit,
        "Starting timeline fetch"
    );

    let config = match Config::load() {
        Ok(config) => match config.validate() {
            Ok(()) => config,
            Err(e) => {
                error!(error = %e, "Configuration invalid");
                print_stderr(&ErrorReport::new(e.to_string()))?;
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!(error = %e, "Configuration could not be loaded");
            print_stderr(&ErrorReport::new(e.to_string()))?;
            std::process::exit(1);
        }
    };

    let client = http_client::build_client(&config)?;
    let resolver = match Resolver::from_config(&config, client) {
        Ok(resolver) => resolver,
        Err(e) => {
            // Environment error: nothing to try at all
            error!(error = %e, "No acquisition strategy available");
            print_stderr(&ErrorReport::new(e.to_string()))?;
            std::process::exit(1);
        }
    };

    info!(strategies = ?resolver.source_ids(), "Strategy order resolved");

    let outcome = resolver.resolve(&username, cli.limit).await;
    let exhausted = outcome.posts.is_empty() && !outcome.failures.is_empty();

    if exhausted {
        error!(
            username = %username,
            reasons = %outcome.failure_message(),
            "All strategies exhausted"
        );
        print_stderr(&ErrorReport::for_user(outcome.failure_message(), &username))?;
    }

    // The run report goes to stdout regardless: an empty result is still a
    // completed run at the process level.
    let report = RunReport::new(&username, outcome.posts, Utc::now().to_rfc3339());
    print_stdout(&report)?;

    if exhausted && cli.strict {
        std::process::exit(1);
    }

    Ok(())
}
