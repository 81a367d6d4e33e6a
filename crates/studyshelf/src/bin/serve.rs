//! Starts the studyshelf server and runs until Ctrl-C.
//!
//! Usage: `cargo run --bin serve`
//!
//! Configuration comes from `STUDYSHELF_CONFIG` (JSON file) plus the
//! `STUDYSHELF_CONTENT`, `STUDYSHELF_BIND`, `SUPABASE_URL`, and
//! `SUPABASE_ANON_KEY` environment overrides.

use studyshelf::{Server, SiteConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match SiteConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("{error}");
            std::process::exit(1);
        }
    };

    let mut server = match Server::new(config).await {
        Ok(server) => server,
        Err(error) => {
            tracing::error!("{error}");
            std::process::exit(1);
        }
    };

    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {error}");
    }
    if let Err(error) = server.shutdown() {
        tracing::error!("{error}");
    }
}
