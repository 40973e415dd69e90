// Library module for the listing feed sync

pub mod config;
pub mod error;
pub mod handler;
pub mod sync;

pub use config::Config;
pub use error::{Result, SyncError};
