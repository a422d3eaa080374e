//! Content-addressed asset cache.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Layout under the cache root:
//!
//! ```text
//! <root>/fonts/<sha256(url)>.css
//! <root>/icons/<sha256(url)>.json
//! ```
//!
//! Entries never expire. A readable file is returned as-is; removing the file
//! is the only way to refresh it. An unreadable file counts as a miss and is
//! overwritten. Concurrent misses for the same URL may both
//! fetch and both write; the write is idempotent for an unchanged upstream.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::{CacheError, Result};
use crate::fetcher::{Fetcher, IconLoader, ReqwestFetcher};
use crate::icons::parse_icon_collection_url;

/// Default time allowed for a single fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default `User-Agent` sent with fetches.
pub fn default_user_agent() -> String {
    format!("atomcss/{}", env!("CARGO_PKG_VERSION"))
}

/// The kind of cached asset, which selects its subdirectory and extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Font,
    Icon,
}

impl AssetKind {
    pub fn subdir(&self) -> &'static str {
        match self {
            AssetKind::Font => "fonts",
            AssetKind::Icon => "icons",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            AssetKind::Font => "css",
            AssetKind::Icon => "json",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Font => write!(f, "font"),
            AssetKind::Icon => write!(f, "icon"),
        }
    }
}

/// Settings for [`AssetCache::new`].
#[derive(Clone)]
pub struct CacheOptions {
    /// Cache root; the platform cache directory when `None`
    pub dir: Option<PathBuf>,
    pub timeout: Duration,
    pub user_agent: String,
    pub fetcher: Option<Arc<dyn Fetcher>>,
    pub icon_loader: Option<Arc<dyn IconLoader>>,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            dir: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
            fetcher: None,
            icon_loader: None,
        }
    }
}

impl fmt::Debug for CacheOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheOptions")
            .field("dir", &self.dir)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("fetcher", &self.fetcher.is_some())
            .field("icon_loader", &self.icon_loader.is_some())
            .finish()
    }
}

/// Lowercase hex SHA-256 of a request key.
pub fn cache_key(url: &str) -> String {
    hex::encode(Sha256::digest(url.as_bytes()))
}

/// Fetch-and-persist cache for remote assets.
pub struct AssetCache {
    root: Option<PathBuf>,
    timeout: Duration,
    user_agent: String,
    fetcher: Arc<dyn Fetcher>,
    icon_loader: Option<Arc<dyn IconLoader>>,
}

impl AssetCache {
    /// Create a cache.
    ///
    /// If the root directory cannot be created the cache still works, but
    /// every request goes to the network.
    pub fn new(options: CacheOptions) -> Self {
        let root = options
            .dir
            .or_else(|| dirs::cache_dir().map(|dir| dir.join("atomcss")));
        let root = root.and_then(|root| match std::fs::create_dir_all(&root) {
            Ok(()) => Some(root),
            Err(e) => {
                warn!(
                    path = %root.display(),
                    error = %e,
                    "cache directory unavailable, fetching without cache"
                );
                None
            }
        });
        if root.is_none() {
            debug!("asset cache running without a directory");
        }

        Self {
            root,
            timeout: options.timeout,
            user_agent: options.user_agent,
            fetcher: options
                .fetcher
                .unwrap_or_else(|| Arc::new(ReqwestFetcher::new())),
            icon_loader: options.icon_loader,
        }
    }

    /// A cache that never touches the disk.
    pub fn without_dir(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            root: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
            fetcher,
            icon_loader: None,
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// File an entry for `url` is stored in, when a cache root exists.
    pub fn path_for(&self, url: &str, kind: AssetKind) -> Option<PathBuf> {
        self.root.as_ref().map(|root| {
            root.join(kind.subdir())
                .join(format!("{}.{}", cache_key(url), kind.extension()))
        })
    }

    /// Return the cached body of `url`, fetching and persisting it on a miss.
    /// An entry that cannot be read as UTF-8 text is a miss.
    ///
    /// `user_agent` overrides the cache's default for this request.
    pub async fn fetch_cached(
        &self,
        url: &str,
        kind: AssetKind,
        user_agent: Option<&str>,
    ) -> Result<String> {
        let path = self.path_for(url, kind);

        if let Some(path) = &path {
            match tokio::fs::read_to_string(path).await {
                Ok(content) => {
                    debug!(url = %url, kind = %kind, "cache hit");
                    return Ok(content);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "unreadable cache entry, refetching"
                    );
                }
            }
        }

        debug!(url = %url, kind = %kind, "cache miss");
        let user_agent = user_agent.unwrap_or(&self.user_agent);
        let content = match tokio::time::timeout(self.timeout, self.fetcher.fetch(url, user_agent))
            .await
        {
            Ok(result) => result?,
            Err(_) => {
                return Err(CacheError::Timeout {
                    url: url.to_string(),
                    timeout: self.timeout,
                });
            }
        };

        if let Some(path) = &path
            && let Err(e) = persist(path, &content).await
        {
            warn!(path = %path.display(), error = %e, "failed to write cache entry");
        }

        Ok(content)
    }

    /// Fetch an iconify collection JSON.
    ///
    /// The URL is validated before the cache or network is consulted. A
    /// configured [`IconLoader`] replaces both.
    pub async fn fetch_icon_collection(&self, url: &str) -> Result<String> {
        let collection = parse_icon_collection_url(url)
            .ok_or_else(|| CacheError::InvalidIconUrl(url.to_string()))?;

        if let Some(loader) = &self.icon_loader {
            debug!(collection = %collection, "loading icon collection from custom loader");
            return loader.load(collection).await;
        }

        self.fetch_cached(url, AssetKind::Icon, None).await
    }
}

impl fmt::Debug for AssetCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetCache")
            .field("root", &self.root)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

async fn persist(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await
}
