//! Write functions - persist the feed as a CSV file in the output directory

use crate::error::Result;
use crate::sync::transform::{build_rows, placeholder_row};
use crate::sync::types::{
    EmptyFeedPolicy, FeedFile, FeedRow, FeedSettings, SourceRecord, CSV_HEADERS,
};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Transform the listings and write the feed file.
/// Returns `None` only when nothing qualifies and the policy is [`EmptyFeedPolicy::Skip`].
pub fn build_feed(records: &[SourceRecord], settings: &FeedSettings) -> Result<Option<FeedFile>> {
    let (mut rows, _stats) = build_rows(records, &settings.availability_marker);
    let mut placeholder = false;

    if rows.is_empty() {
        warn!(
            "No listings qualify for the feed; empty feed policy is {}",
            settings.empty_feed_policy
        );
        match settings.empty_feed_policy {
            EmptyFeedPolicy::Placeholder => {
                rows.push(placeholder_row());
                placeholder = true;
            }
            EmptyFeedPolicy::HeaderOnly => {}
            EmptyFeedPolicy::Skip => return Ok(None),
        }
    }

    let path = settings.output_dir.join(&settings.filename);
    write_feed(&path, &rows)?;

    Ok(Some(FeedFile {
        path,
        filename: settings.filename.clone(),
        rows: rows.len(),
        placeholder,
    }))
}

/// Write the header and rows, replacing any previous file
pub fn write_feed(path: &Path, rows: &[FeedRow]) -> Result<()> {
    info!("Writing {} feed rows to {:?}", rows.len(), path);

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let mut writer = csv::WriterBuilder::new().from_path(path)?;
    writer.write_record(CSV_HEADERS)?;
    for row in rows {
        writer.write_record(row.cells())?;
    }
    writer.flush()?;

    Ok(())
}
