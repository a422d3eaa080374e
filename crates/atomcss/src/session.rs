//! Generation sessions.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! A session compiles its configuration once, then accumulates utility tokens
//! from any number of sources and regenerates CSS on demand.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use atomcss_cache::AssetCache;
use atomcss_config::{Configuration, compile};
use atomcss_engine::{GenerateOptions, Generator};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::options::Options;

/// Source id used by [`Session::update_default`].
pub const DEFAULT_SOURCE: &str = "default";

pub struct Session {
    configuration: Configuration,
    generator: Generator,
    cache: Arc<AssetCache>,
    generate_options: GenerateOptions,
    sources: BTreeMap<String, BTreeSet<String>>,
}

impl Session {
    /// Compile the configuration and instantiate its presets.
    pub async fn init(options: Options) -> Result<Self> {
        let configuration = match &options.config {
            Some(source) => compile(source)?,
            None => Configuration::default(),
        };
        let cache = Arc::new(AssetCache::new(options.cache_options()));
        let user_config = configuration
            .clone()
            .into_user_config(&cache)
            .await
            .map_err(Error::from_preset_resolution)?;
        let generator = Generator::new(user_config);
        info!(
            presets = ?generator.presets().collect::<Vec<_>>(),
            reset = ?configuration.reset,
            "session initialized"
        );

        Ok(Self {
            configuration,
            generator,
            cache,
            generate_options: options.generate,
            sources: BTreeMap::new(),
        })
    }

    /// Extract tokens from `content` into the set tracked for `source_id`.
    ///
    /// Returns whether that set grew.
    pub fn update(&mut self, content: &str, source_id: &str) -> bool {
        let tokens = self.sources.entry(source_id.to_string()).or_default();
        let before = tokens.len();
        self.generator.apply_extractors(content, tokens);
        let grew = tokens.len() > before;
        debug!(source = %source_id, tokens = tokens.len(), grew, "update");
        grew
    }

    pub fn update_default(&mut self, content: &str) -> bool {
        self.update(content, DEFAULT_SOURCE)
    }

    /// Forget the tokens of `source_id`. Returns whether it was tracked.
    pub fn remove_source(&mut self, source_id: &str) -> bool {
        self.sources.remove(source_id).is_some()
    }

    /// Union of the tokens of every source.
    pub fn tokens(&self) -> Cow<'_, BTreeSet<String>> {
        let mut sets = self.sources.values();
        match (sets.next(), sets.next()) {
            (Some(only), None) => Cow::Borrowed(only),
            _ => Cow::Owned(self.sources.values().flatten().cloned().collect()),
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn cache(&self) -> &Arc<AssetCache> {
        &self.cache
    }

    /// The selected reset stylesheet, empty without a reset import.
    pub fn reset_css(&self) -> &'static str {
        self.configuration.reset_css()
    }

    /// Generate with the options the session was initialized with.
    pub async fn generate(&self) -> Result<String> {
        self.generate_with(&self.generate_options).await
    }

    /// Reset text followed by the CSS for every token seen so far.
    ///
    /// Before the first [`update`](Self::update) only the reset text is
    /// returned.
    pub async fn generate_with(&self, options: &GenerateOptions) -> Result<String> {
        let reset = self.reset_css();
        if self.sources.is_empty() {
            return Ok(reset.to_string());
        }
        let tokens = self.tokens();
        let result = self.generator.generate(&tokens, options).await?;
        debug!(
            tokens = tokens.len(),
            matched = result.matched.len(),
            "generated"
        );
        Ok(format!("{}{}", reset, result.css))
    }
}

/// Compile `config`, extract tokens from `input` and generate in one call.
pub async fn generate(config: &str, input: &str, options: Options) -> Result<String> {
    let mut session = Session::init(Options {
        config: Some(config.to_string()),
        ..options
    })
    .await?;
    session.update_default(input);
    session.generate().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use atomcss_cache::AssetKind;
    use pretty_assertions::assert_eq;

    async fn session(config: &str) -> (tempfile::TempDir, Session) {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::init(Options {
            config: Some(config.to_string()),
            cache_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        })
        .await
        .unwrap();
        (dir, session)
    }

    #[tokio::test]
    async fn test_update_reports_growth() {
        let (_dir, mut session) = session("").await;
        assert!(session.update_default(r#"<div class="flex p-4">"#));
        assert!(!session.update_default(r#"<span class="p-4">"#));
        assert!(session.update("<b class=\"m-2\">", "other.html"));
        assert!(session.tokens().contains("m-2"));
        assert!(session.tokens().contains("flex"));
    }

    #[tokio::test]
    async fn test_single_source_tokens_are_borrowed() {
        let (_dir, mut session) = session("").await;
        session.update_default("flex");
        assert!(matches!(session.tokens(), Cow::Borrowed(_)));
        session.update("grid", "b");
        assert!(matches!(session.tokens(), Cow::Owned(_)));
    }

    #[tokio::test]
    async fn test_removed_source_no_longer_contributes() {
        let (_dir, mut session) = session("").await;
        session.update("flex", "a");
        session.update("grid", "b");
        assert!(session.remove_source("b"));
        assert!(!session.remove_source("b"));
        let css = session.generate().await.unwrap();
        assert!(css.contains(".flex{display:flex;}"));
        assert!(!css.contains(".grid{"));
    }

    #[tokio::test]
    async fn test_invalid_config_fails_init() {
        let dir = tempfile::tempdir().unwrap();
        let err = Session::init(Options {
            config: Some(r#"@import "reset/bootstrap";"#.to_string()),
            cache_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        })
        .await
        .err()
        .unwrap();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.to_string(), "invalid reset selector: bootstrap");
        assert!(err.as_cache_error().is_none());
    }

    #[tokio::test]
    async fn test_default_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::init(Options {
            cache_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        })
        .await
        .unwrap();
        assert_eq!(session.reset_css(), "");
        assert!(session.configuration().presets.is_empty());
        assert!(
            session
                .cache()
                .path_for("https://example.com/x.css", AssetKind::Font)
                .is_some()
        );
    }
}
