//! Invocation entry point - runs fetch → transform → publish once

use crate::config::Config;
use crate::error::Result;
use crate::sync::types::FeedFile;
use crate::sync::{fetch, publish, write};
use serde_json::{Map, Value};
use std::error::Error as _;
use tracing::{debug, error, info, warn};

/// Outcome of one sync run
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub fetched: usize,
    /// `None` when nothing qualified and the empty feed policy skips publishing
    pub feed: Option<FeedFile>,
    pub bytes_uploaded: u64,
}

impl std::fmt::Display for SyncReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.feed {
            Some(feed) => write!(
                f,
                "fetched: {}, rows: {}{}, uploaded: {} bytes",
                self.fetched,
                feed.rows,
                if feed.placeholder { " (placeholder)" } else { "" },
                self.bytes_uploaded
            ),
            None => write!(f, "fetched: {}, nothing published", self.fetched),
        }
    }
}

/// Trigger entry point. The event payload is ignored; success yields an empty map.
pub async fn handle(event: Value, config: &Config) -> Result<Map<String, Value>> {
    debug!("Invocation event: {}", event);

    match run(config).await {
        Ok(report) => {
            info!("Feed sync complete: {}", report);
            Ok(Map::new())
        }
        Err(e) => {
            error!("Feed sync failed: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                error!("  caused by: {}", cause);
                source = cause.source();
            }
            Err(e)
        }
    }
}

/// Run the whole pipeline; any failure aborts the remaining steps
pub async fn run(config: &Config) -> Result<SyncReport> {
    info!("Step 1/3: Fetching listings...");
    let records = fetch::fetch_records(&config.source).await?;
    let fetched = records.len();

    info!("Step 2/3: Building feed...");
    let feed = write::build_feed(&records, &config.feed)?;

    let Some(feed) = feed else {
        warn!("Step 3/3: Skipped, no feed to publish");
        return Ok(SyncReport {
            fetched,
            feed: None,
            bytes_uploaded: 0,
        });
    };

    info!("Step 3/3: Publishing {}...", feed.filename);
    let bytes_uploaded = publish::publish(&config.transfer, &feed).await?;

    Ok(SyncReport {
        fetched,
        feed: Some(feed),
        bytes_uploaded,
    })
}
