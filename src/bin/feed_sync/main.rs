//! Feed sync runner - one scheduled invocation of fetch, transform, publish

use anyhow::{Context, Result};
use newdigs_feed_sync::{handler, Config};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the scheduler sets real env vars
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .init();

    info!("Starting listing feed sync");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Configuration loaded");

    handler::handle(Value::Null, &config)
        .await
        .context("Listing feed sync failed")?;

    Ok(())
}
