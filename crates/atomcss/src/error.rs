//! Top-level error type.
//!
//! Copyright (c) 2025 Posit, PBC

use atomcss_cache::CacheError;
use atomcss_config::ConfigError;
use atomcss_engine::EngineError;
use atomcss_presets::PresetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The configuration document is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A remote asset needed by a preset could not be fetched
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Generation failed, usually while a preset prepared its assets
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl Error {
    /// Lift asset failures out of preset resolution so callers see them as
    /// [`Error::Cache`].
    pub(crate) fn from_preset_resolution(error: ConfigError) -> Self {
        match error {
            ConfigError::Preset(PresetError::Asset(e)) => Error::Cache(e),
            other => Error::Config(other),
        }
    }

    /// The asset failure behind this error, if any.
    pub fn as_cache_error(&self) -> Option<&CacheError> {
        match self {
            Error::Cache(e) => Some(e),
            Error::Config(ConfigError::Preset(PresetError::Asset(e))) => Some(e),
            Error::Engine(EngineError::Preset { source, .. }) => {
                source.downcast_ref::<CacheError>().or_else(|| {
                    match source.downcast_ref::<PresetError>() {
                        Some(PresetError::Asset(e)) => Some(e),
                        _ => None,
                    }
                })
            }
            Error::Config(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
