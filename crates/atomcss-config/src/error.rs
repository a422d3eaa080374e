//! Error types for configuration compilation.
//!
//! Copyright (c) 2025 Posit, PBC

use atomcss_presets::PresetError;
use atomcss_syntax::ParseError;
use thiserror::Error;

/// Errors that can occur while compiling a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The root node handed to the compiler is not a stylesheet
    #[error("invalid configuration document: expected StyleSheet, found {0}")]
    InvalidDocument(&'static str),

    /// The document could not be parsed
    #[error("invalid configuration document: {0}")]
    Parse(#[from] ParseError),

    /// `@import "reset/<name>"` names no known reset
    #[error("invalid reset selector: {0}")]
    InvalidReset(String),

    /// `@import "preset-web-fonts/<name>"` names no known provider
    #[error("invalid web-font provider: {0}")]
    InvalidProvider(String),

    /// A preset could not be resolved or instantiated
    #[error(transparent)]
    Preset(#[from] PresetError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
