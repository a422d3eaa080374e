//! Tagify preset: element names as utilities (`<text-red>` applies `text-red`).
//!
//! Copyright (c) 2025 Posit, PBC

use std::collections::BTreeSet;
use std::sync::Arc;

use atomcss_engine::{Extractor, Preset, Theme, Variant, VariantApply, VariantMatch};
use once_cell::sync::Lazy;
use regex::Regex;

const TAG_PREFIX: &str = "tag:";

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<([A-Za-z][\w:-]*)").unwrap());

/// Emits `tag:<name>` for every opening tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagExtractor;

impl Extractor for TagExtractor {
    fn name(&self) -> &str {
        "tagify"
    }

    fn extract(&self, content: &str, tokens: &mut BTreeSet<String>) {
        for caps in TAG_RE.captures_iter(content) {
            tokens.insert(format!("{}{}", TAG_PREFIX, &caps[1]));
        }
    }
}

/// Turns `tag:<name>` back into utility `<name>` with the bare tag selector.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagVariant;

impl Variant for TagVariant {
    fn name(&self) -> &str {
        "tagify"
    }

    fn match_variant(&self, token: &str, _theme: &Theme) -> Option<VariantMatch> {
        let tag = token.strip_prefix(TAG_PREFIX)?;
        if tag.is_empty() {
            return None;
        }
        Some(VariantMatch {
            rest: tag.to_string(),
            apply: VariantApply::Selector(tag.to_string()),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PresetTagify;

impl Preset for PresetTagify {
    fn name(&self) -> &str {
        "preset-tagify"
    }

    fn variants(&self) -> Vec<Arc<dyn Variant>> {
        vec![Arc::new(TagVariant)]
    }

    fn extractors(&self) -> Vec<Arc<dyn Extractor>> {
        vec![Arc::new(TagExtractor)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_tag_names() {
        let mut tokens = BTreeSet::new();
        TagExtractor.extract("<text-red>hi</text-red><flex x=1/>", &mut tokens);
        assert_eq!(
            tokens.into_iter().collect::<Vec<_>>(),
            vec!["tag:flex", "tag:text-red"]
        );
    }

    #[test]
    fn test_variant_uses_tag_selector() {
        let m = TagVariant.match_variant("tag:text-red", &Theme::new()).unwrap();
        assert_eq!(m.rest, "text-red");
        assert_eq!(m.apply, VariantApply::Selector("text-red".into()));
        assert!(TagVariant.match_variant("text-red", &Theme::new()).is_none());
    }
}
