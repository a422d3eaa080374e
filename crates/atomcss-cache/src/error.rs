//! Error types for asset fetching and caching.
//!
//! Copyright (c) 2025 Posit, PBC

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while fetching an asset.
///
/// Persistence failures are not represented here: a fetched asset that cannot
/// be written to the cache is still returned to the caller.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The request did not complete in time
    #[error("fetch timeout after {}ms: {url}", timeout.as_millis())]
    Timeout { url: String, timeout: Duration },

    /// The request could not be sent or its body could not be read
    #[error("fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    /// The server answered with a non-success status
    #[error("fetch failed for {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    /// The URL does not point at an iconify collection
    #[error("invalid icon resource URL: {0}")]
    InvalidIconUrl(String),
}

impl CacheError {
    pub fn fetch(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
