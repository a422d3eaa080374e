//! Error types for CSS generation.
//!
//! Copyright (c) 2025 Posit, PBC

use thiserror::Error;

/// Errors that can occur while generating CSS.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A preset failed to prepare for the requested tokens
    #[error("preset '{preset}' failed: {source}")]
    Preset {
        preset: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl EngineError {
    pub fn preset(
        preset: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Preset {
            preset: preset.into(),
            source: source.into(),
        }
    }
}
