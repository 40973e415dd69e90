//! Error types for the feed sync

use thiserror::Error;

/// Where in the FTP session a transfer failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStage {
    Connect,
    Secure,
    Login,
    ChangeDir,
    Store,
    Quit,
}

impl std::fmt::Display for TransferStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferStage::Connect => write!(f, "connect"),
            TransferStage::Secure => write!(f, "TLS upgrade"),
            TransferStage::Login => write!(f, "login"),
            TransferStage::ChangeDir => write!(f, "change directory"),
            TransferStage::Store => write!(f, "store"),
            TransferStage::Quit => write!(f, "quit"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Missing required config variable: {0}")]
    MissingConfig(&'static str),

    #[error("Invalid config value for {name}: {message}")]
    InvalidConfig { name: &'static str, message: String },

    #[error("Listings API returned HTTP {status} for {url}")]
    Fetch { status: u16, url: String },

    #[error("Listings API response has no '{0}' field")]
    MissingField(&'static str),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode listings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Feed file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write CSV feed: {0}")]
    Csv(#[from] csv::Error),

    #[error("FTP {stage} failed: {source}")]
    Transfer {
        stage: TransferStage,
        #[source]
        source: suppaftp::FtpError,
    },

    #[error("Upload task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl SyncError {
    pub fn transfer(stage: TransferStage) -> impl FnOnce(suppaftp::FtpError) -> SyncError {
        move |source| SyncError::Transfer { stage, source }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
