//! Web-fonts preset: provider stylesheets and font-family stacks.
//!
//! Copyright (c) 2025 Posit, PBC

use std::fmt;
use std::str::FromStr;

use atomcss_cache::{AssetCache, AssetKind};
use atomcss_engine::{LAYER_IMPORTS, Preflight, Preset, Theme, ThemeScope};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

/// Google serves woff2 only to browsers it recognizes.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Where web-font stylesheets come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebFontProvider {
    None,
    #[default]
    Google,
    Bunny,
    Fontshare,
}

impl WebFontProvider {
    pub fn name(&self) -> &'static str {
        match self {
            WebFontProvider::None => "none",
            WebFontProvider::Google => "google",
            WebFontProvider::Bunny => "bunny",
            WebFontProvider::Fontshare => "fontshare",
        }
    }

    pub fn all() -> &'static [WebFontProvider] {
        &[
            WebFontProvider::None,
            WebFontProvider::Google,
            WebFontProvider::Bunny,
            WebFontProvider::Fontshare,
        ]
    }

    /// User agent to send, when the provider needs a specific one.
    pub fn user_agent(&self) -> Option<&'static str> {
        match self {
            WebFontProvider::Google => Some(BROWSER_USER_AGENT),
            _ => None,
        }
    }

    /// Stylesheet URL for a set of fonts, or `None` when nothing is fetched.
    pub fn stylesheet_url(&self, fonts: &[WebFont]) -> Option<String> {
        if fonts.is_empty() {
            return None;
        }
        match self {
            WebFontProvider::None => None,
            WebFontProvider::Google => {
                let families: Vec<String> = fonts
                    .iter()
                    .map(|font| {
                        let name = font.name.replace(' ', "+");
                        if font.weights.is_empty() {
                            format!("family={}", name)
                        } else {
                            format!("family={}:wght@{}", name, font.weights.join(";"))
                        }
                    })
                    .collect();
                Some(format!(
                    "https://fonts.googleapis.com/css2?{}&display=swap",
                    families.join("&")
                ))
            }
            WebFontProvider::Bunny => {
                let families: Vec<String> = fonts
                    .iter()
                    .map(|font| {
                        let name = slug(&font.name);
                        if font.weights.is_empty() {
                            name
                        } else {
                            format!("{}:{}", name, font.weights.join(","))
                        }
                    })
                    .collect();
                Some(format!(
                    "https://fonts.bunny.net/css?family={}&display=swap",
                    families.join("|")
                ))
            }
            WebFontProvider::Fontshare => {
                let families: Vec<String> = fonts
                    .iter()
                    .map(|font| {
                        let weights = if font.weights.is_empty() {
                            "400".to_string()
                        } else {
                            font.weights.join(",")
                        };
                        format!("f[]={}@{}", slug(&font.name), weights)
                    })
                    .collect();
                Some(format!(
                    "https://api.fontshare.com/v2/css?{}&display=swap",
                    families.join("&")
                ))
            }
        }
    }
}

impl FromStr for WebFontProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        WebFontProvider::all()
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for WebFontProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// A font family with optional weights, parsed from `Name:400,700`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebFont {
    pub name: String,
    pub weights: Vec<String>,
}

impl WebFont {
    pub fn parse(descriptor: &str) -> Self {
        match descriptor.split_once(':') {
            Some((name, weights)) => Self {
                name: name.trim().to_string(),
                weights: weights
                    .split(',')
                    .map(str::trim)
                    .filter(|w| !w.is_empty())
                    .map(str::to_string)
                    .collect(),
            },
            None => Self {
                name: descriptor.trim().to_string(),
                weights: Vec::new(),
            },
        }
    }
}

/// Fonts keyed by font-family theme key.
#[derive(Debug, Clone)]
pub struct PresetWebFonts {
    fonts: IndexMap<String, Vec<WebFont>>,
    css: Option<String>,
}

impl PresetWebFonts {
    /// Fetch the provider stylesheet through the cache and build the preset.
    pub async fn load(
        web_fonts: &IndexMap<String, Vec<String>>,
        provider: WebFontProvider,
        cache: &AssetCache,
    ) -> Result<Self> {
        let fonts: IndexMap<String, Vec<WebFont>> = web_fonts
            .iter()
            .map(|(key, descriptors)| {
                (
                    key.clone(),
                    descriptors.iter().map(|d| WebFont::parse(d)).collect(),
                )
            })
            .collect();

        let all: Vec<WebFont> = fonts.values().flatten().cloned().collect();
        let css = match provider.stylesheet_url(&all) {
            Some(url) => {
                info!(provider = %provider, families = all.len(), "loading web fonts");
                Some(
                    cache
                        .fetch_cached(&url, AssetKind::Font, provider.user_agent())
                        .await?,
                )
            }
            None => {
                debug!(provider = %provider, "no web-font stylesheet to load");
                None
            }
        };

        Ok(Self { fonts, css })
    }

    pub fn css(&self) -> Option<&str> {
        self.css.as_deref()
    }
}

impl Preset for PresetWebFonts {
    fn name(&self) -> &str {
        "preset-web-fonts"
    }

    fn extend_theme(&self, theme: &mut Theme) {
        for (key, fonts) in &self.fonts {
            let mut stack: Vec<String> = fonts.iter().map(|f| format!("\"{}\"", f.name)).collect();
            if let Some(existing) = theme.get(ThemeScope::FontFamily, key) {
                stack.push(existing.to_string());
            }
            theme.insert(ThemeScope::FontFamily, key.clone(), stack.join(","));
        }
    }

    fn preflights(&self) -> Vec<Preflight> {
        self.css
            .iter()
            .map(|css| Preflight::raw(LAYER_IMPORTS, css.clone()))
            .collect()
    }
}
