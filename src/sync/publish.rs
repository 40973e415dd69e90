//! Publish functions - deliver the feed file to the aggregator over FTP

use crate::config::TransferConfig;
use crate::error::{Result, SyncError, TransferStage};
use crate::sync::types::FeedFile;
use std::fs::File;
use suppaftp::native_tls::TlsConnector;
use suppaftp::types::FileType;
use suppaftp::{FtpError, NativeTlsConnector, NativeTlsFtpStream};
use tracing::{debug, info};

/// The FTP operations the upload needs
pub trait TransferSession {
    fn change_dir(&mut self, dir: &str) -> Result<()>;
    /// Binary-mode store of `file` under `name`; returns bytes sent
    fn store_binary(&mut self, name: &str, file: &mut File) -> Result<u64>;
    fn finish(&mut self) -> Result<()>;
}

impl TransferSession for NativeTlsFtpStream {
    fn change_dir(&mut self, dir: &str) -> Result<()> {
        self.cwd(dir)
            .map_err(SyncError::transfer(TransferStage::ChangeDir))
    }

    fn store_binary(&mut self, name: &str, file: &mut File) -> Result<u64> {
        self.transfer_type(FileType::Binary)
            .map_err(SyncError::transfer(TransferStage::Store))?;
        self.put_file(name, file)
            .map_err(SyncError::transfer(TransferStage::Store))
    }

    fn finish(&mut self) -> Result<()> {
        self.quit().map_err(SyncError::transfer(TransferStage::Quit))
    }
}

/// Ends the session on every exit path
struct SessionGuard<S: TransferSession>(S);

impl<S: TransferSession> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        if let Err(e) = self.0.finish() {
            debug!("Ignoring error while closing transfer session: {}", e);
        }
    }
}

/// Open an FTP session and log in, upgrading to TLS first when configured
pub fn open_session(config: &TransferConfig) -> Result<NativeTlsFtpStream> {
    info!("Connecting to {}", config.host);

    let mut stream = NativeTlsFtpStream::connect(config.host.as_str())
        .map_err(SyncError::transfer(TransferStage::Connect))?;

    if config.secure {
        let connector = TlsConnector::new()
            .map_err(|e| FtpError::SecureError(e.to_string()))
            .map_err(SyncError::transfer(TransferStage::Secure))?;
        stream = stream
            .into_secure(NativeTlsConnector::from(connector), config.domain())
            .map_err(SyncError::transfer(TransferStage::Secure))?;
        debug!("Transfer session secured for {}", config.domain());
    }

    stream
        .login(config.username.as_str(), config.password.as_str())
        .map_err(SyncError::transfer(TransferStage::Login))?;

    Ok(stream)
}

/// Store the feed file in `remote_dir` under its local name
pub fn upload<S: TransferSession>(session: S, remote_dir: &str, feed: &FeedFile) -> Result<u64> {
    let mut session = SessionGuard(session);
    let mut file = File::open(&feed.path)?;

    session.0.change_dir(remote_dir)?;
    let bytes = session.0.store_binary(&feed.filename, &mut file)?;

    info!("Uploaded {} ({} bytes) to {}", feed.filename, bytes, remote_dir);
    Ok(bytes)
}

/// Publish the feed; runs the blocking FTP session off the async runtime
pub async fn publish(config: &TransferConfig, feed: &FeedFile) -> Result<u64> {
    let config = config.clone();
    let feed = feed.clone();

    tokio::task::spawn_blocking(move || {
        let session = open_session(&config)?;
        upload(session, &config.remote_dir, &feed)
    })
    .await?
}
