//! Operator entry point: categorize one user's uncategorized bookmarks.
//!
//! ```sh
//! stash-categorize --user 0190f5d2-... --limit 25
//! ```
//!
//! Prints the run summary as JSON on stdout. Ctrl-C stops the run, abandoning
//! any in-flight classifier call, and still prints the partial summary.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use stash_categorize::{BatchCategorizer, CancellationToken, Stores};
use stash_core::defaults::UNCATEGORIZED_BATCH_LIMIT;
use stash_db::{Database, PoolConfig};
use stash_inference::AnthropicClassifier;

#[derive(Parser, Debug)]
#[command(name = "stash-categorize", version, about = "Categorize uncategorized bookmarks")]
struct Args {
    /// User whose bookmarks are categorized.
    #[arg(long)]
    user: Uuid,

    /// Maximum number of bookmarks to process.
    #[arg(
        long,
        env = "STASH_CATEGORIZE_LIMIT",
        default_value_t = UNCATEGORIZED_BATCH_LIMIT,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    limit: i64,

    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

/// Install the global subscriber. Console output goes to stderr so stdout
/// carries only the summary.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, daily rotation)
///   RUST_LOG    - standard env filter (default: "stash_categorize=info")
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stash_categorize=info,stash_inference=info".into());
    let registry = tracing_subscriber::registry().with(env_filter);

    if let Some(ref path) = log_file {
        let path = std::path::Path::new(path);
        let file_dir = path.parent().unwrap_or(std::path::Path::new("."));
        let file_name = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("stash-categorize.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(non_blocking))
                .init();
        } else {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        } else {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
        None
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let _file_guard = init_tracing();
    let args = Args::parse();

    let db = Database::connect_with_config(&args.database_url, PoolConfig::from_env())
        .await
        .context("failed to connect to database")?;
    let classifier = AnthropicClassifier::from_env().context("failed to build classifier")?;
    let categorizer = BatchCategorizer::new(Stores::postgres(&db), Arc::new(classifier));

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupt received, stopping categorization");
                signal_token.cancel();
            }
            Err(e) => warn!(error = %e, "Failed to listen for interrupt"),
        }
    });

    info!(user_id = %args.user, limit = args.limit, "Categorizing uncategorized bookmarks");
    let summary = categorizer
        .categorize_uncategorized(args.user, Some(args.limit), &cancel)
        .await
        .context("categorization failed")?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
