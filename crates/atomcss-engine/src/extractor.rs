//! Token extraction from source content.
//!
//! Copyright (c) 2025 Posit, PBC

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Finds candidate utility tokens in a piece of content.
pub trait Extractor: Send + Sync {
    fn name(&self) -> &str;

    /// Insert every candidate token of `content` into `tokens`.
    fn extract(&self, content: &str, tokens: &mut BTreeSet<String>);
}

static SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[\\:]?[\s'"`;{}]+"#).unwrap());

/// Splits content on whitespace, quotes and braces.
///
/// Everything that survives is a candidate; the generator discards whatever no
/// rule, shortcut or variant understands.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitExtractor;

impl Extractor for SplitExtractor {
    fn name(&self) -> &str {
        "split"
    }

    fn extract(&self, content: &str, tokens: &mut BTreeSet<String>) {
        for piece in SPLIT_RE.split(content) {
            if is_valid_token(piece) {
                tokens.insert(piece.to_string());
            }
        }
    }
}

fn is_valid_token(piece: &str) -> bool {
    !piece.is_empty()
        && piece.len() < 200
        && piece.chars().any(|c| c.is_ascii_alphanumeric())
        && !piece.starts_with('<')
        && !piece.ends_with('=')
}
