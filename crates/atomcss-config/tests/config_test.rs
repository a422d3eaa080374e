/*
 * config_test.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Compiling whole documents and generating CSS from the result.
 */

use std::collections::BTreeSet;
use std::sync::Arc;

use atomcss_cache::{AssetCache, CacheOptions};
use atomcss_config::{Configuration, Reset, compile};
use atomcss_engine::{GenerateOptions, Generator, Theme, ThemeScope};
use atomcss_presets::{PresetId, WebFontProvider};
use pretty_assertions::assert_eq;

const DOCUMENT: &str = r#"
@import "@unocss/preset-wind";
@import "preset-typography";
@import "preset-wind";
@import "@unocss/reset/eric-meyer.css";

@theme {
  --color-primary: #232323;
  --breakpoint-3xl: 1920px;
  --animation-duration-spin: 2s;
  --font-family-display: "Fraunces", serif;
}

@keyframes wiggle {
  from { transform: rotate(-3deg); }
  to { transform: rotate(3deg); }
}

.custom { --uno: text-lg font-bold; }
.btn { @apply px-4 text-primary; cursor: pointer; }
.custom { --uno: text-sm; }

body { margin: 0; }

@media print { .hidden-in-print { --uno: hidden; } }
"#;

fn summary(config: &Configuration) -> (Vec<PresetId>, Theme, Vec<(String, String)>, Vec<String>) {
    let theme = Theme::new();
    (
        config.presets.iter().copied().collect(),
        config.theme.clone(),
        config
            .shortcuts
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        config
            .preflights
            .iter()
            .map(|p| format!("{}: {}", p.layer, p.render(&theme)))
            .collect(),
    )
}

fn cache() -> (tempfile::TempDir, Arc<AssetCache>) {
    let dir = tempfile::tempdir().unwrap();
    let cache = Arc::new(AssetCache::new(CacheOptions {
        dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    }));
    (dir, cache)
}

#[test]
fn test_document_compiles() {
    let config = compile(DOCUMENT).unwrap();
    let (presets, theme, shortcuts, preflights) = summary(&config);

    assert_eq!(presets, vec![PresetId::Wind, PresetId::Typography]);
    assert_eq!(config.reset, Some(Reset::EricMeyer));
    assert_eq!(config.web_fonts_provider, WebFontProvider::Google);
    assert!(config.web_fonts.is_empty());

    assert_eq!(theme.get(ThemeScope::Colors, "primary"), Some("#232323"));
    assert_eq!(theme.get(ThemeScope::Breakpoints, "3xl"), Some("1920px"));
    assert_eq!(
        theme.get(ThemeScope::FontFamily, "display"),
        Some("\"Fraunces\",serif")
    );
    assert_eq!(theme.animation.durations.get("spin").unwrap(), "2s");
    assert_eq!(
        theme.animation.keyframes.get("wiggle").unwrap(),
        "{from{transform:rotate(-3deg)}to{transform:rotate(3deg)}}"
    );

    assert_eq!(
        shortcuts,
        vec![
            ("custom".to_string(), "text-sm".to_string()),
            ("btn".to_string(), "px-4 text-primary".to_string()),
        ]
    );
    assert_eq!(
        preflights,
        vec![
            "utilities: .btn{cursor:pointer}".to_string(),
            "preflights: body{margin:0}".to_string(),
        ]
    );
}

#[test]
fn test_compilation_is_idempotent() {
    let first = compile(DOCUMENT).unwrap();
    let second = compile(DOCUMENT).unwrap();
    assert_eq!(summary(&first), summary(&second));
}

#[tokio::test]
async fn test_shortcut_scenario_under_default_preset() {
    let config = compile(".custom { --uno: text-lg font-bold; }").unwrap();
    assert_eq!(config.shortcuts.get("custom").unwrap(), "text-lg font-bold");

    let (_dir, cache) = cache();
    let generator = Generator::new(config.into_user_config(&cache).await.unwrap());
    assert_eq!(generator.presets().collect::<Vec<_>>(), vec!["preset-uno"]);

    let mut tokens = BTreeSet::new();
    generator.apply_extractors(r#"<div class="custom">"#, &mut tokens);
    let result = generator
        .generate(&tokens, &GenerateOptions::default())
        .await
        .unwrap();
    assert!(
        result
            .css
            .contains(".custom{font-size:1.125rem;line-height:1.75rem;font-weight:700;}")
    );
}

#[tokio::test]
async fn test_theme_and_preflights_reach_output() {
    let (_dir, cache) = cache();
    let config = compile(DOCUMENT).unwrap();
    let generator = Generator::new(config.into_user_config(&cache).await.unwrap());

    let tokens: BTreeSet<String> = ["btn", "3xl:flex", "animate-wiggle"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let result = generator
        .generate(&tokens, &GenerateOptions::default())
        .await
        .unwrap();

    assert!(result.css.starts_with("/* layer: preflights */\nbody{margin:0}"));
    assert!(result.css.contains(".btn{padding-left:1rem;padding-right:1rem;"));
    assert!(result.css.contains("@media (min-width: 1920px){.\\33 xl\\:flex{display:flex;}}"));
    assert!(result.css.contains("@keyframes wiggle{from{transform:rotate(-3deg)}"));
    assert!(result.css.contains("/* layer: utilities */\n.btn{cursor:pointer}"));
}

#[tokio::test]
async fn test_web_fonts_without_import_are_inert() {
    let config = compile(r#"@theme { --font-family-sans: webfont("Inter") }"#).unwrap();
    assert_eq!(
        config.web_fonts.get("sans").unwrap(),
        &vec!["Inter".to_string()]
    );
    let (_dir, cache) = cache();
    let user = config.into_user_config(&cache).await.unwrap();
    let names: Vec<_> = user.presets.iter().map(|p| p.name().to_string()).collect();
    assert_eq!(names, vec!["preset-uno"]);
}
