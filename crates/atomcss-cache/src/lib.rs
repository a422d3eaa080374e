//! Asset cache for remote web-font stylesheets and icon collections.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Assets are stored under a cache root keyed by the SHA-256 of their URL and
//! trusted forever once written. Fetches go through the [`Fetcher`] seam and
//! are bounded by a timeout.

mod cache;
mod error;
mod fetcher;
mod icons;

pub use cache::{AssetCache, AssetKind, CacheOptions, DEFAULT_TIMEOUT, cache_key, default_user_agent};
pub use error::{CacheError, Result};
pub use fetcher::{Fetcher, IconLoader, ReqwestFetcher};
pub use icons::{icon_collection_url, parse_icon_collection_url};
