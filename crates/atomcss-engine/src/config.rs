//! Generator configuration and generation options.
//!
//! Copyright (c) 2025 Posit, PBC

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::preset::Preset;
use crate::theme::Theme;

/// CSS emitted verbatim into a named layer.
///
/// The CSS is produced from the final merged theme, so a preflight declared
/// before the theme is complete still sees every theme value.
#[derive(Clone)]
pub struct Preflight {
    pub layer: String,
    pub css: Arc<dyn Fn(&Theme) -> String + Send + Sync>,
}

impl Preflight {
    pub fn new<F>(layer: impl Into<String>, css: F) -> Self
    where
        F: Fn(&Theme) -> String + Send + Sync + 'static,
    {
        Self {
            layer: layer.into(),
            css: Arc::new(css),
        }
    }

    /// A preflight whose CSS does not depend on the theme.
    pub fn raw(layer: impl Into<String>, css: impl Into<String>) -> Self {
        let css = css.into();
        Self::new(layer, move |_| css.clone())
    }

    pub fn render(&self, theme: &Theme) -> String {
        (self.css)(theme)
    }
}

impl fmt::Debug for Preflight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preflight")
            .field("layer", &self.layer)
            .finish_non_exhaustive()
    }
}

/// Everything the generator needs besides the tokens.
#[derive(Clone, Default)]
pub struct UserConfig {
    pub presets: Vec<Arc<dyn Preset>>,
    pub theme: Theme,
    pub shortcuts: IndexMap<String, String>,
    pub preflights: Vec<Preflight>,
}

impl fmt::Debug for UserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let presets: Vec<_> = self.presets.iter().map(|p| p.name()).collect();
        f.debug_struct("UserConfig")
            .field("presets", &presets)
            .field("theme", &self.theme)
            .field("shortcuts", &self.shortcuts)
            .field("preflights", &self.preflights)
            .finish()
    }
}

/// Options for a single generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerateOptions {
    /// Include preflight layers in the output
    pub preflights: bool,
    /// Drop layer comments and newlines
    pub minify: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            preflights: true,
            minify: false,
        }
    }
}

/// Output of a generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateResult {
    pub css: String,
    /// Tokens that produced at least one rule
    pub matched: BTreeSet<String>,
    /// Layers present in `css`, in output order
    pub layers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_options_defaults_from_partial_json() {
        let opts: GenerateOptions = serde_json::from_str(r#"{"minify": true}"#).unwrap();
        assert!(opts.preflights);
        assert!(opts.minify);
    }

    #[test]
    fn test_preflight_renders_from_theme() {
        let preflight = Preflight::new("utilities", |theme: &Theme| {
            format!("/* {} */", theme.is_empty())
        });
        assert_eq!(preflight.render(&Theme::new()), "/* true */");
        assert_eq!(Preflight::raw("base", "a{b:c}").render(&Theme::new()), "a{b:c}");
    }
}
