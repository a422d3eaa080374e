//! Atomic CSS generation engine.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! This crate provides:
//! - A typed theme (`Theme`, `ThemeScope`, `AnimationTheme`)
//! - The `Preset` contract and its building blocks (rules, variants, extractors, preflights)
//! - `Generator`, which turns extracted tokens into layered CSS

mod config;
mod error;
mod escape;
mod extractor;
mod generator;
mod preset;
mod rule;
mod theme;
mod variant;

pub use config::{GenerateOptions, GenerateResult, Preflight, UserConfig};
pub use error::EngineError;
pub use escape::escape_selector;
pub use extractor::{Extractor, SplitExtractor};
pub use generator::{Generator, layer_order};
pub use preset::Preset;
pub use rule::{Declarations, Rule, RuleOutput};
pub use theme::{AnimationKind, AnimationTheme, Theme, ThemeScope};
pub use variant::{
    BreakpointVariant, ParentVariant, PseudoVariant, Variant, VariantApply, VariantMatch,
};

/// Layer of preflights unless a preflight names another.
pub const LAYER_PREFLIGHTS: &str = "preflights";
/// Layer of utilities produced from shortcuts.
pub const LAYER_SHORTCUTS: &str = "shortcuts";
/// Layer of utilities produced from rules.
pub const LAYER_DEFAULT: &str = "default";
/// Layer of imported stylesheets (web fonts).
pub const LAYER_IMPORTS: &str = "imports";
