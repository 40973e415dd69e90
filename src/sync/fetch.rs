//! Fetch functions - retrieve the current listings from the records API

use crate::config::SourceConfig;
use crate::error::{Result, SyncError};
use crate::sync::types::SourceRecord;
use crate::sync::utils::http_client;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{error, info, warn};

/// Fetch every listing in the Pets table with a single GET
pub async fn fetch_records(config: &SourceConfig) -> Result<Vec<SourceRecord>> {
    let url = config.records_url();
    info!("Fetching listings from {}", url);

    let client = http_client(config.timeout)?;
    let response = client.get(&url).bearer_auth(&config.api_key).send().await?;
    let status = response.status();

    if status != StatusCode::OK {
        error!("Listings API response: {}", status);
        error!("URL: {}", url);
        error!("Request headers: Authorization: Bearer <redacted>");
        error!("Response headers: {:?}", response.headers());
        return Err(SyncError::Fetch {
            status: status.as_u16(),
            url,
        });
    }

    let body: Value = response.json().await?;
    let records = parse_records(body)?;
    info!("Fetched {} listings", records.len());

    Ok(records)
}

/// Pull the `records` array out of a response body
pub fn parse_records(mut body: Value) -> Result<Vec<SourceRecord>> {
    if body.get("offset").is_some() {
        warn!("Listings API reported more pages; only the first page is synced");
    }

    let records = body
        .get_mut("records")
        .map(Value::take)
        .ok_or(SyncError::MissingField("records"))?;
    let items: Vec<Value> = serde_json::from_value(records)?;

    // one unreadable listing must not hold back the rest of the feed
    let mut parsed = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        let id = item
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", idx));

        match serde_json::from_value::<SourceRecord>(item) {
            Ok(record) => parsed.push(record),
            Err(e) => warn!("Skipping unreadable listing {}: {}", id, e),
        }
    }

    Ok(parsed)
}
