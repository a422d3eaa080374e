//! Network seams.
//!
//! Copyright (c) 2025 Posit, PBC

use async_trait::async_trait;
use tracing::debug;

use crate::error::{CacheError, Result};

/// Fetches the body of a URL as text.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, user_agent: &str) -> Result<String>;
}

/// Loads an iconify collection JSON by collection name, bypassing the network.
#[async_trait]
pub trait IconLoader: Send + Sync {
    async fn load(&self, collection: &str) -> Result<String>;
}

/// [`Fetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str, user_agent: &str) -> Result<String> {
        debug!(url = %url, "fetching asset");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()
            .await
            .map_err(|e| CacheError::fetch(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CacheError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| CacheError::fetch(url, e))
    }
}
