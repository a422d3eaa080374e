//! The mini preset: the common core every other utility preset builds on.
//!
//! Copyright (c) 2025 Posit, PBC

pub(crate) mod rules;
mod theme;
mod variants;

use std::sync::Arc;

use atomcss_engine::{Preset, Rule, Theme, Variant};

pub use theme::default_theme;

#[derive(Debug, Clone, Copy, Default)]
pub struct PresetMini;

impl Preset for PresetMini {
    fn name(&self) -> &str {
        "preset-mini"
    }

    fn theme(&self) -> Theme {
        default_theme()
    }

    fn rules(&self) -> Vec<Rule> {
        rules::rules()
    }

    fn variants(&self) -> Vec<Arc<dyn Variant>> {
        variants::variants()
    }
}
