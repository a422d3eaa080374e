//! The preset contract.
//!
//! Copyright (c) 2025 Posit, PBC

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::config::Preflight;
use crate::extractor::Extractor;
use crate::rule::Rule;
use crate::theme::Theme;
use crate::variant::Variant;

/// A named bundle of rules, variants, shortcuts, preflights and theme values.
///
/// Every method except [`Preset::name`] has an empty default, so a preset only
/// implements what it contributes.
#[async_trait]
pub trait Preset: Send + Sync {
    fn name(&self) -> &str;

    /// Default theme values, overridden by later presets and the user theme.
    fn theme(&self) -> Theme {
        Theme::default()
    }

    /// Adjust the fully merged theme.
    fn extend_theme(&self, _theme: &mut Theme) {}

    fn rules(&self) -> Vec<Rule> {
        Vec::new()
    }

    fn variants(&self) -> Vec<Arc<dyn Variant>> {
        Vec::new()
    }

    fn shortcuts(&self) -> IndexMap<String, String> {
        IndexMap::new()
    }

    fn preflights(&self) -> Vec<Preflight> {
        Vec::new()
    }

    fn extractors(&self) -> Vec<Arc<dyn Extractor>> {
        Vec::new()
    }

    /// Load whatever the preset needs for `tokens` before rules run.
    async fn prepare(
        &self,
        _tokens: &BTreeSet<String>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}
