//! Static preset registry.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Presets are constructed by identifier through a table filled once at
//! startup. Construction is asynchronous because some presets (web fonts)
//! fetch assets while being built.

use std::collections::BTreeMap;
use std::sync::Arc;

use atomcss_cache::AssetCache;
use atomcss_engine::Preset;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use tracing::info;

use crate::attributify::PresetAttributify;
use crate::error::{PresetError, Result};
use crate::icons::PresetIcons;
use crate::id::PresetId;
use crate::mini::PresetMini;
use crate::tagify::PresetTagify;
use crate::typography::PresetTypography;
use crate::web_fonts::{PresetWebFonts, WebFontProvider};
use crate::wind::PresetWind;

/// Everything a preset constructor may need.
#[derive(Clone)]
pub struct PresetContext {
    pub web_fonts: IndexMap<String, Vec<String>>,
    pub provider: WebFontProvider,
    pub cache: Arc<AssetCache>,
}

impl PresetContext {
    pub fn new(cache: Arc<AssetCache>) -> Self {
        Self {
            web_fonts: IndexMap::new(),
            provider: WebFontProvider::default(),
            cache,
        }
    }
}

pub type Constructor = fn(&PresetContext) -> BoxFuture<'_, Result<Arc<dyn Preset>>>;

#[derive(Default)]
pub struct PresetRegistry {
    constructors: BTreeMap<PresetId, Constructor>,
}

impl PresetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in preset.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(PresetId::Uno, uno);
        registry.register(PresetId::Wind, wind);
        registry.register(PresetId::Mini, mini);
        registry.register(PresetId::Typography, typography);
        registry.register(PresetId::WebFonts, web_fonts);
        registry.register(PresetId::Tagify, tagify);
        registry.register(PresetId::Icons, icons);
        registry.register(PresetId::Attributify, attributify);
        registry
    }

    pub fn register(&mut self, id: PresetId, constructor: Constructor) {
        self.constructors.insert(id, constructor);
    }

    pub fn contains(&self, id: PresetId) -> bool {
        self.constructors.contains_key(&id)
    }

    pub async fn resolve(&self, id: PresetId, ctx: &PresetContext) -> Result<Arc<dyn Preset>> {
        let constructor = self
            .constructors
            .get(&id)
            .ok_or_else(|| PresetError::UnknownPreset(id.name().to_string()))?;
        info!(preset = %id, "resolving preset");
        constructor(ctx).await
    }

    pub async fn resolve_name(&self, name: &str, ctx: &PresetContext) -> Result<Arc<dyn Preset>> {
        self.resolve(name.parse()?, ctx).await
    }
}

static REGISTRY: Lazy<PresetRegistry> = Lazy::new(PresetRegistry::builtin);

/// The process-wide registry of built-in presets.
pub fn registry() -> &'static PresetRegistry {
    &REGISTRY
}

fn ready(preset: impl Preset + 'static) -> BoxFuture<'static, Result<Arc<dyn Preset>>> {
    let preset: Arc<dyn Preset> = Arc::new(preset);
    Box::pin(async move { Ok(preset) })
}

fn uno(_: &PresetContext) -> BoxFuture<'_, Result<Arc<dyn Preset>>> {
    ready(PresetWind::uno())
}

fn wind(_: &PresetContext) -> BoxFuture<'_, Result<Arc<dyn Preset>>> {
    ready(PresetWind::wind())
}

fn mini(_: &PresetContext) -> BoxFuture<'_, Result<Arc<dyn Preset>>> {
    ready(PresetMini)
}

fn typography(_: &PresetContext) -> BoxFuture<'_, Result<Arc<dyn Preset>>> {
    ready(PresetTypography)
}

fn tagify(_: &PresetContext) -> BoxFuture<'_, Result<Arc<dyn Preset>>> {
    ready(PresetTagify)
}

fn attributify(_: &PresetContext) -> BoxFuture<'_, Result<Arc<dyn Preset>>> {
    ready(PresetAttributify)
}

fn icons(ctx: &PresetContext) -> BoxFuture<'_, Result<Arc<dyn Preset>>> {
    ready(PresetIcons::new(ctx.cache.clone()))
}

fn web_fonts(ctx: &PresetContext) -> BoxFuture<'_, Result<Arc<dyn Preset>>> {
    Box::pin(async move {
        let preset = PresetWebFonts::load(&ctx.web_fonts, ctx.provider, &ctx.cache).await?;
        Ok(Arc::new(preset) as Arc<dyn Preset>)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> PresetContext {
        PresetContext::new(Arc::new(AssetCache::new(atomcss_cache::CacheOptions {
            dir: Some(std::env::temp_dir().join("atomcss-registry-test")),
            ..Default::default()
        })))
    }

    #[test]
    fn test_builtin_covers_every_id() {
        for id in PresetId::all() {
            assert!(registry().contains(*id), "{} not registered", id);
        }
    }

    #[tokio::test]
    async fn test_resolve_by_name() {
        let preset = registry().resolve_name("preset-uno", &context()).await.unwrap();
        assert_eq!(preset.name(), "preset-uno");
        let preset = registry()
            .resolve(PresetId::Typography, &context())
            .await
            .unwrap();
        assert_eq!(preset.name(), "preset-typography");
    }

    #[tokio::test]
    async fn test_unknown_preset() {
        let err = registry()
            .resolve_name("preset-nonsense", &context())
            .await
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "unknown preset module: preset-nonsense");

        let empty = PresetRegistry::new();
        let err = empty.resolve(PresetId::Mini, &context()).await.err().unwrap();
        assert!(matches!(err, PresetError::UnknownPreset(name) if name == "preset-mini"));
    }

    #[tokio::test]
    async fn test_web_fonts_without_fonts_skips_fetch() {
        let preset = registry()
            .resolve(PresetId::WebFonts, &context())
            .await
            .unwrap();
        assert!(preset.preflights().is_empty());
    }
}
