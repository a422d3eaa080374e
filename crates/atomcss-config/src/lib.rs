//! CSS configuration documents for atomcss
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! This crate provides:
//! - `compile`, which turns a configuration document into a `Configuration`
//!   (presets, theme, shortcuts, preflights, reset, web fonts)
//! - `Configuration::into_user_config`, which instantiates the presets for
//!   the generator
//! - The embedded reset stylesheets

mod compile;
mod configuration;
mod directives;
mod error;
mod reset;
mod rules;
mod theme;

pub use compile::{compile, compile_node, compile_stylesheet};
pub use configuration::{Configuration, DEFAULT_PRESET};
pub use error::{ConfigError, Result};
pub use reset::Reset;
pub use rules::LAYER_UTILITIES;
