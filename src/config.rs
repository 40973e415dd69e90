//! Configuration loaded from environment variables (and `.env`, if present)

use crate::error::{Result, SyncError};
use crate::sync::types::{EmptyFeedPolicy, FeedSettings};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.airtable.com";
pub const DEFAULT_FEED_FILENAME: &str = "newdigs.csv";
pub const DEFAULT_FTP_HOST: &str = "ftp.rescuegroups.org:21";
pub const DEFAULT_FTP_REMOTE_DIR: &str = "import";
pub const DEFAULT_AVAILABILITY_MARKER: &str = "Published";

/// Listings API settings
#[derive(Clone)]
pub struct SourceConfig {
    pub api_url: String,
    pub base_id: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceConfig")
            .field("api_url", &self.api_url)
            .field("base_id", &self.base_id)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SourceConfig {
    /// `<api_url>/v0/<base_id>/Pets`
    pub fn records_url(&self) -> String {
        format!(
            "{}/v0/{}/Pets",
            self.api_url.trim_end_matches('/'),
            self.base_id
        )
    }
}

/// FTP destination settings
#[derive(Clone)]
pub struct TransferConfig {
    /// `host:port`
    pub host: String,
    pub username: String,
    pub password: String,
    pub remote_dir: String,
    /// Upgrade the session to explicit TLS after connecting
    pub secure: bool,
}

impl std::fmt::Debug for TransferConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("remote_dir", &self.remote_dir)
            .field("secure", &self.secure)
            .finish()
    }
}

impl TransferConfig {
    /// Host name without the port, used for TLS verification
    pub fn domain(&self) -> &str {
        self.host
            .rsplit_once(':')
            .map(|(host, _)| host)
            .unwrap_or(&self.host)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: SourceConfig,
    pub feed: FeedSettings,
    pub transfer: TransferConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(SyncError::MissingConfig(key));

        let timeout_secs = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| SyncError::InvalidConfig {
                name: "HTTP_TIMEOUT_SECS",
                message: e.to_string(),
            })?,
            None => 60,
        };
        if timeout_secs == 0 {
            return Err(SyncError::InvalidConfig {
                name: "HTTP_TIMEOUT_SECS",
                message: "must be at least 1 second".to_string(),
            });
        }

        let secure = match get("FTP_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| SyncError::InvalidConfig {
                name: "FTP_SECURE",
                message: format!("expected true or false, got '{}'", raw),
            })?,
            None => false,
        };

        let empty_feed_policy = match get("EMPTY_FEED_POLICY") {
            Some(raw) => raw
                .parse::<EmptyFeedPolicy>()
                .map_err(|message| SyncError::InvalidConfig {
                    name: "EMPTY_FEED_POLICY",
                    message,
                })?,
            None => EmptyFeedPolicy::default(),
        };

        Ok(Config {
            source: SourceConfig {
                api_url: get("AIRTABLE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                base_id: required("AIRTABLE_BASE")?,
                api_key: required("AIRTABLE_API_KEY")?,
                timeout: Duration::from_secs(timeout_secs),
            },
            feed: FeedSettings {
                availability_marker: get("AVAILABILITY_MARKER")
                    .unwrap_or_else(|| DEFAULT_AVAILABILITY_MARKER.to_string()),
                empty_feed_policy,
                output_dir: get("FEED_OUTPUT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(env::temp_dir),
                filename: get("FEED_FILENAME")
                    .unwrap_or_else(|| DEFAULT_FEED_FILENAME.to_string()),
            },
            transfer: TransferConfig {
                host: get("FTP_HOST").unwrap_or_else(|| DEFAULT_FTP_HOST.to_string()),
                username: required("FTP_USERNAME")?,
                password: required("FTP_PASSWORD")?,
                remote_dir: get("FTP_REMOTE_DIR")
                    .unwrap_or_else(|| DEFAULT_FTP_REMOTE_DIR.to_string()),
                secure,
            },
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
