//! Attributify preset: utilities written as HTML attributes.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! `<div text="lg red-500" flex>` yields the tokens `[text~="lg"]`,
//! `[text~="red-500"]` and `[flex=""]`, which resolve to `text-lg`,
//! `text-red-500` and `flex` under attribute selectors.

use std::collections::BTreeSet;
use std::sync::Arc;

use atomcss_engine::{Extractor, Preset, Theme, Variant, VariantApply, VariantMatch};
use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[A-Za-z][\w:-]*(\s[^>]*)?>").unwrap());

static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_][\w:-]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>/=]+)))?"#).unwrap()
});

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\[([A-Za-z_][\w:-]*)(~?)="([^"]*)"\]$"#).unwrap());

/// Attributes that never carry utilities.
const IGNORED: &[&str] = &["class", "className", "style", "id", "href", "src", "alt", "for"];

#[derive(Debug, Clone, Copy, Default)]
pub struct AttributifyExtractor;

impl Extractor for AttributifyExtractor {
    fn name(&self) -> &str {
        "attributify"
    }

    fn extract(&self, content: &str, tokens: &mut BTreeSet<String>) {
        for tag in TAG_RE.captures_iter(content) {
            let Some(attrs) = tag.get(1) else {
                continue;
            };
            for attr in ATTR_RE.captures_iter(attrs.as_str()) {
                let name = &attr[1];
                if IGNORED.contains(&name) || name.starts_with("data-") || name.starts_with("aria-") {
                    continue;
                }
                let value = attr.get(2).or_else(|| attr.get(3)).or_else(|| attr.get(4));
                match value {
                    Some(value) => {
                        for word in value.as_str().split_whitespace() {
                            tokens.insert(format!("[{}~=\"{}\"]", name, word));
                        }
                    }
                    None => {
                        tokens.insert(format!("[{}=\"\"]", name));
                    }
                }
            }
        }
    }
}

/// Resolves attribute tokens to utilities.
///
/// A `~` value stands for the attribute name alone, so `flex="~ col"` makes
/// both `flex` and `flex-col`. A variant inside the value moves to the front:
/// `text="hover:red"` becomes `hover:text-red`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributifyVariant;

impl Variant for AttributifyVariant {
    fn name(&self) -> &str {
        "attributify"
    }

    fn match_variant(&self, token: &str, _theme: &Theme) -> Option<VariantMatch> {
        let caps = TOKEN_RE.captures(token)?;
        let name = &caps[1];
        let value = &caps[3];
        let rest = if caps[2].is_empty() || value.is_empty() || value == "~" {
            name.to_string()
        } else {
            match value.rsplit_once(':') {
                Some((variants, body)) if body == "~" => format!("{}:{}", variants, name),
                Some((variants, body)) => format!("{}:{}-{}", variants, name, body),
                None => format!("{}-{}", name, value),
            }
        };
        Some(VariantMatch {
            rest,
            apply: VariantApply::Selector(token.to_string()),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PresetAttributify;

impl Preset for PresetAttributify {
    fn name(&self) -> &str {
        "preset-attributify"
    }

    fn variants(&self) -> Vec<Arc<dyn Variant>> {
        vec![Arc::new(AttributifyVariant)]
    }

    fn extractors(&self) -> Vec<Arc<dyn Extractor>> {
        vec![Arc::new(AttributifyExtractor)]
    }
}
