//! Error types for preset resolution.
//!
//! Copyright (c) 2025 Posit, PBC

use atomcss_cache::CacheError;
use thiserror::Error;

/// Errors that can occur while resolving or preparing a preset.
#[derive(Debug, Error)]
pub enum PresetError {
    /// No constructor is registered under this name
    #[error("unknown preset module: {0}")]
    UnknownPreset(String),

    /// A remote asset the preset depends on could not be fetched
    #[error(transparent)]
    Asset(#[from] CacheError),

    /// An icon collection was fetched but is not valid iconify JSON
    #[error("invalid icon collection '{collection}': {source}")]
    IconCollection {
        collection: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, PresetError>;
