//! Session options.
//!
//! Copyright (c) 2025 Posit, PBC

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use atomcss_cache::{CacheOptions, DEFAULT_TIMEOUT, IconLoader, default_user_agent};
use atomcss_engine::GenerateOptions;
use serde::{Deserialize, Serialize};

/// Options for [`Session::init`](crate::Session::init).
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Configuration document; the default configuration when `None`
    pub config: Option<String>,
    /// Asset cache root; the platform cache directory when `None`
    pub cache_dir: Option<PathBuf>,
    /// Fetch timeout in milliseconds
    pub timeout_ms: u64,
    pub user_agent: Option<String>,
    /// Defaults for [`Session::generate`](crate::Session::generate)
    pub generate: GenerateOptions,
    /// Supplies icon collections instead of the network and the cache
    #[serde(skip)]
    pub icon_loader: Option<Arc<dyn IconLoader>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config: None,
            cache_dir: None,
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            user_agent: None,
            generate: GenerateOptions::default(),
            icon_loader: None,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("config", &self.config.as_ref().map(String::len))
            .field("cache_dir", &self.cache_dir)
            .field("timeout_ms", &self.timeout_ms)
            .field("user_agent", &self.user_agent)
            .field("generate", &self.generate)
            .field("icon_loader", &self.icon_loader.is_some())
            .finish()
    }
}

impl Options {
    pub(crate) fn cache_options(&self) -> CacheOptions {
        CacheOptions {
            dir: self.cache_dir.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
            user_agent: self.user_agent.clone().unwrap_or_else(default_user_agent),
            fetcher: None,
            icon_loader: self.icon_loader.clone(),
        }
    }
}
