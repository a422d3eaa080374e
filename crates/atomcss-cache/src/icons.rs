//! Iconify collection URLs.
//!
//! Copyright (c) 2025 Posit, PBC

use once_cell::sync::Lazy;
use regex::Regex;

static ICON_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[^/]+/.*@iconify-json/([a-z0-9-]+)(?:@[^/]+)?/icons\.json$").unwrap()
});

/// CDN URL of an iconify collection.
pub fn icon_collection_url(collection: &str) -> String {
    format!(
        "https://cdn.jsdelivr.net/npm/@iconify-json/{}/icons.json",
        collection
    )
}

/// Extract the collection name from an iconify collection URL.
///
/// Returns `None` when the URL does not have the expected shape.
pub fn parse_icon_collection_url(url: &str) -> Option<&str> {
    ICON_URL_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
