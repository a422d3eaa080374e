/*
 * session_test.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * End-to-end sessions: configuration in, CSS out.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use atomcss::{GenerateOptions, Options, Session, generate};
use atomcss_cache::{CacheError, IconLoader};
use pretty_assertions::assert_eq;

const ERIC_MEYER_HEAD: &str = "/* http://meyerweb.com/eric/tools/css/reset/";

fn options(dir: &tempfile::TempDir, config: &str) -> Options {
    Options {
        config: Some(config.to_string()),
        cache_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_shortcut_expands_to_utilities() {
    let dir = tempfile::tempdir().unwrap();
    let css = generate(
        ".custom { --uno: text-lg font-bold; }",
        r#"<div class="custom">"#,
        options(&dir, ""),
    )
    .await
    .unwrap();
    assert!(css.contains("/* layer: shortcuts */"));
    assert!(css.contains(".custom{font-size:1.125rem;line-height:1.75rem;font-weight:700;}"));
}

#[tokio::test]
async fn test_default_preset_without_imports() {
    let dir = tempfile::tempdir().unwrap();
    let css = generate("", r#"<div class="flex">"#, options(&dir, ""))
        .await
        .unwrap();
    assert!(css.contains(".flex{display:flex;}"));
}

#[tokio::test]
async fn test_reset_prefixes_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::init(options(&dir, r#"@import "@unocss/reset/eric-meyer.css";"#))
        .await
        .unwrap();

    let before = session.generate().await.unwrap();
    assert!(before.starts_with(ERIC_MEYER_HEAD));
    assert_eq!(before, session.reset_css());

    session.update_default("flex");
    let after = session.generate().await.unwrap();
    assert!(after.starts_with(ERIC_MEYER_HEAD));
    assert!(after.ends_with(".flex{display:flex;}"));
}

#[tokio::test]
async fn test_no_reset_without_import() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::init(options(&dir, "")).await.unwrap();
    assert_eq!(session.generate().await.unwrap(), "");
    session.update_default("flex");
    assert!(session.generate().await.unwrap().starts_with("/* layer: default */"));
}

#[tokio::test]
async fn test_generate_options_override() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::init(options(&dir, "body { margin: 0 }")).await.unwrap();
    session.update_default("flex");

    let full = session.generate().await.unwrap();
    assert!(full.contains("body{margin:0}"));

    let bare = session
        .generate_with(&GenerateOptions {
            preflights: false,
            minify: false,
        })
        .await
        .unwrap();
    assert!(!bare.contains("body{margin:0}"));
    assert!(bare.contains(".flex{display:flex;}"));
}

#[tokio::test]
async fn test_tokens_accumulate_across_sources() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::init(options(&dir, "")).await.unwrap();
    assert!(session.update(r#"<div class="flex">"#, "index.html"));
    assert!(session.update(r#"<div class="grid">"#, "about.html"));
    assert!(!session.update(r#"<p class="flex">"#, "index.html"));

    let css = session.generate().await.unwrap();
    assert!(css.contains(".flex{display:flex;}"));
    assert!(css.contains(".grid{display:grid;}"));
}

struct MdiLoader {
    calls: AtomicUsize,
}

#[async_trait]
impl IconLoader for MdiLoader {
    async fn load(&self, collection: &str) -> Result<String, CacheError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(collection, "mdi");
        Ok(r#"{"prefix":"mdi","icons":{"home":{"body":"<path fill=\"currentColor\" d=\"M10 20v-6h4v6\"/>"}},"width":24,"height":24}"#.to_string())
    }
}

#[tokio::test]
async fn test_icons_through_loader() {
    let dir = tempfile::tempdir().unwrap();
    let loader = Arc::new(MdiLoader {
        calls: AtomicUsize::new(0),
    });
    let mut session = Session::init(Options {
        icon_loader: Some(loader.clone()),
        ..options(&dir, r#"@import "preset-uno"; @import "preset-icons";"#)
    })
    .await
    .unwrap();

    session.update_default(r#"<span class="i-mdi-home">"#);
    let first = session.generate().await.unwrap();
    let second = session.generate().await.unwrap();
    assert_eq!(first, second);
    assert!(first.contains("/* layer: icons */"));
    assert!(first.contains(".i-mdi-home{"));
    assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
}
