//! The compiled configuration and its conversion to generator input.
//!
//! Copyright (c) 2025 Posit, PBC

use std::sync::Arc;

use atomcss_cache::AssetCache;
use atomcss_engine::{Preflight, Theme, UserConfig};
use atomcss_presets::{PresetContext, PresetId, WebFontProvider, registry};
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info};

use crate::error::Result;
use crate::reset::Reset;

/// Preset activated when a document imports none.
pub const DEFAULT_PRESET: PresetId = PresetId::Uno;

/// Everything a configuration document declares.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    /// Activated presets in import order
    pub presets: IndexSet<PresetId>,
    pub theme: Theme,
    /// Class name to space-joined utilities
    pub shortcuts: IndexMap<String, String>,
    /// Raw CSS in document order
    pub preflights: Vec<Preflight>,
    pub reset: Option<Reset>,
    /// Font-family key to `Name:weights` descriptors
    pub web_fonts: IndexMap<String, Vec<String>>,
    pub web_fonts_provider: WebFontProvider,
}

impl Configuration {
    /// Text prefixed to the generated CSS; empty without a reset import.
    pub fn reset_css(&self) -> &'static str {
        self.reset.map_or("", |reset| reset.css())
    }

    /// Presets that will be instantiated, with the default applied.
    pub fn effective_presets(&self) -> Vec<PresetId> {
        if self.presets.is_empty() {
            vec![DEFAULT_PRESET]
        } else {
            self.presets.iter().copied().collect()
        }
    }

    /// Instantiate the presets and build the generator configuration.
    ///
    /// Presets that fetch assets (web fonts) do so here, through `cache`.
    pub async fn into_user_config(self, cache: &Arc<AssetCache>) -> Result<UserConfig> {
        if self.presets.is_empty() {
            info!(preset = %DEFAULT_PRESET, "no preset imported, using default");
        }
        if !self.web_fonts.is_empty() && !self.presets.contains(&PresetId::WebFonts) {
            debug!(
                families = self.web_fonts.len(),
                "web fonts declared without importing preset-web-fonts"
            );
        }

        let ctx = PresetContext {
            web_fonts: self.web_fonts.clone(),
            provider: self.web_fonts_provider,
            cache: cache.clone(),
        };
        let mut presets = Vec::new();
        for id in self.effective_presets() {
            presets.push(registry().resolve(id, &ctx).await?);
        }

        Ok(UserConfig {
            presets,
            theme: self.theme,
            shortcuts: self.shortcuts,
            preflights: self.preflights,
        })
    }
}
