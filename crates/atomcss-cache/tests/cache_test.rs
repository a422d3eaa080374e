/*
 * cache_test.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Fetch-and-persist behavior of the asset cache.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use atomcss_cache::{
    AssetCache, AssetKind, CacheError, CacheOptions, Fetcher, IconLoader, icon_collection_url,
};
use pretty_assertions::assert_eq;

/// Returns a fixed body and counts calls.
#[derive(Default)]
struct CountingFetcher {
    calls: AtomicUsize,
    user_agents: Mutex<Vec<String>>,
}

#[async_trait]
impl Fetcher for CountingFetcher {
    async fn fetch(&self, url: &str, user_agent: &str) -> atomcss_cache::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.user_agents
            .lock()
            .unwrap()
            .push(user_agent.to_string());
        Ok(format!("/* body of {} */", url))
    }
}

struct NeverFetcher;

#[async_trait]
impl Fetcher for NeverFetcher {
    async fn fetch(&self, _url: &str, _user_agent: &str) -> atomcss_cache::Result<String> {
        std::future::pending().await
    }
}

struct StatusFetcher;

#[async_trait]
impl Fetcher for StatusFetcher {
    async fn fetch(&self, url: &str, _user_agent: &str) -> atomcss_cache::Result<String> {
        Err(CacheError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

struct StaticLoader;

#[async_trait]
impl IconLoader for StaticLoader {
    async fn load(&self, collection: &str) -> atomcss_cache::Result<String> {
        Ok(format!(r#"{{"prefix":"{}","icons":{{}}}}"#, collection))
    }
}

fn cache_in(dir: &std::path::Path, fetcher: Arc<CountingFetcher>) -> AssetCache {
    AssetCache::new(CacheOptions {
        dir: Some(dir.to_path_buf()),
        fetcher: Some(fetcher),
        ..Default::default()
    })
}

const FONT_URL: &str = "https://fonts.bunny.net/css?family=inter:400,700&display=swap";

#[tokio::test]
async fn test_pre_populated_entry_skips_network() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = Arc::new(CountingFetcher::default());
    let cache = cache_in(dir.path(), fetcher.clone());

    let path = cache.path_for(FONT_URL, AssetKind::Font).unwrap();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "@font-face{font-family:Inter}").unwrap();

    let css = cache
        .fetch_cached(FONT_URL, AssetKind::Font, None)
        .await
        .unwrap();
    assert_eq!(css, "@font-face{font-family:Inter}");
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_miss_fetches_once_then_persists() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = Arc::new(CountingFetcher::default());
    let cache = cache_in(dir.path(), fetcher.clone());

    let first = cache
        .fetch_cached(FONT_URL, AssetKind::Font, Some("browser/1.0"))
        .await
        .unwrap();
    let second = cache
        .fetch_cached(FONT_URL, AssetKind::Font, None)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    assert_eq!(*fetcher.user_agents.lock().unwrap(), vec!["browser/1.0"]);
    let path = cache.path_for(FONT_URL, AssetKind::Font).unwrap();
    assert_eq!(std::fs::read_to_string(path).unwrap(), first);
}

#[tokio::test]
async fn test_unreadable_entry_is_refetched_and_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = Arc::new(CountingFetcher::default());
    let cache = cache_in(dir.path(), fetcher.clone());

    let path = cache.path_for(FONT_URL, AssetKind::Font).unwrap();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

    let css = cache
        .fetch_cached(FONT_URL, AssetKind::Font, None)
        .await
        .unwrap();
    assert_eq!(css, format!("/* body of {} */", FONT_URL));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), css);

    let again = cache
        .fetch_cached(FONT_URL, AssetKind::Font, None)
        .await
        .unwrap();
    assert_eq!(again, css);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_default_user_agent() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = Arc::new(CountingFetcher::default());
    let cache = cache_in(dir.path(), fetcher.clone());
    cache
        .fetch_cached(FONT_URL, AssetKind::Font, None)
        .await
        .unwrap();
    let agents = fetcher.user_agents.lock().unwrap();
    assert!(agents[0].starts_with("atomcss/"));
}

#[tokio::test]
async fn test_no_dir_always_fetches() {
    let fetcher = Arc::new(CountingFetcher::default());
    let cache = AssetCache::without_dir(fetcher.clone());
    for _ in 0..2 {
        cache
            .fetch_cached(FONT_URL, AssetKind::Font, None)
            .await
            .unwrap();
    }
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_fetch_times_out() {
    let cache = AssetCache::without_dir(Arc::new(NeverFetcher));
    let err = cache
        .fetch_cached(FONT_URL, AssetKind::Font, None)
        .await
        .unwrap_err();
    match err {
        CacheError::Timeout { url, timeout } => {
            assert_eq!(url, FONT_URL);
            assert_eq!(timeout, Duration::from_secs(10));
        }
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_status_error_is_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let cache = AssetCache::new(CacheOptions {
        dir: Some(dir.path().to_path_buf()),
        fetcher: Some(Arc::new(StatusFetcher)),
        ..Default::default()
    });
    let err = cache
        .fetch_cached(FONT_URL, AssetKind::Font, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CacheError::Status { status: 404, .. }));
    assert!(!cache.path_for(FONT_URL, AssetKind::Font).unwrap().exists());
}

#[tokio::test]
async fn test_icon_url_validated_before_any_fetch() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = Arc::new(CountingFetcher::default());
    let cache = cache_in(dir.path(), fetcher.clone());

    let err = cache
        .fetch_icon_collection("https://example.com/mdi.json")
        .await
        .unwrap_err();
    assert!(matches!(err, CacheError::InvalidIconUrl(_)));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);

    let body = cache
        .fetch_icon_collection(&icon_collection_url("mdi"))
        .await
        .unwrap();
    assert!(body.contains("@iconify-json/mdi/icons.json"));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    assert!(
        cache
            .path_for(&icon_collection_url("mdi"), AssetKind::Icon)
            .unwrap()
            .exists()
    );
}

#[tokio::test]
async fn test_icon_loader_replaces_network() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = Arc::new(CountingFetcher::default());
    let cache = AssetCache::new(CacheOptions {
        dir: Some(dir.path().to_path_buf()),
        fetcher: Some(fetcher.clone()),
        icon_loader: Some(Arc::new(StaticLoader)),
        ..Default::default()
    });
    let body = cache
        .fetch_icon_collection(&icon_collection_url("carbon"))
        .await
        .unwrap();
    assert_eq!(body, r#"{"prefix":"carbon","icons":{}}"#);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
}
