//! Feed sync module - fetch, transform and publish pipeline for pet listings

pub mod fetch;
pub mod publish;
pub mod transform;
pub mod types;
pub mod utils;
pub mod write;

pub use types::*;
