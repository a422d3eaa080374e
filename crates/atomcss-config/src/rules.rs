//! Rule classification: shortcuts, theme rules and raw CSS.
//!
//! Copyright (c) 2025 Posit, PBC

use atomcss_engine::{LAYER_PREFLIGHTS, Preflight};
use atomcss_syntax::{Block, Node, Rule, generate_block};
use tracing::debug;

use crate::configuration::Configuration;
use crate::theme::ThemeCompiler;

/// Layer of the non-apply declarations of class rules.
pub const LAYER_UTILITIES: &str = "utilities";

/// Selectors that mark a rule body as theme declarations.
const THEME_SELECTORS: &[&str] = &[":theme", ":root:theme"];

/// Custom properties whose value is a list of utilities to apply.
const APPLY_PROPERTIES: &[&str] = &["--uno", "--at-apply", "--uno-apply"];

const APPLY_AT_RULE: &str = "apply";

/// The class name of a selector that is a single class and nothing else.
///
/// Escaped characters (`.sm\:flex`) are unescaped.
fn plain_class(selector: &str) -> Option<String> {
    let body = selector.strip_prefix('.')?;
    let mut name = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => name.push(chars.next()?),
            ch if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii() => {
                name.push(ch)
            }
            _ => return None,
        }
    }
    (!name.is_empty()).then_some(name)
}

pub(crate) fn rule(config: &mut Configuration, rule: &Rule) {
    if let Some(selector) = rule.prelude.single()
        && THEME_SELECTORS.contains(&selector)
    {
        ThemeCompiler {
            theme: &mut config.theme,
            web_fonts: &mut config.web_fonts,
        }
        .block(&rule.block);
        return;
    }

    for selector in &rule.prelude.selectors {
        match plain_class(selector) {
            Some(class) => class_rule(config, selector, class, &rule.block),
            None => raw_rule(config, selector, &rule.block),
        }
    }
}

/// Split a class rule into a shortcut (apply sources) and a utilities preflight
/// (everything else).
fn class_rule(config: &mut Configuration, selector: &str, class: String, block: &Block) {
    let mut applies = Vec::new();
    let mut rest = Block::default();
    for child in &block.children {
        match child {
            Node::AtRule(at_rule) if at_rule.name == APPLY_AT_RULE => {
                if let Some(prelude) = &at_rule.prelude {
                    applies.push(prelude.text.trim().to_string());
                }
            }
            Node::Declaration(decl) if APPLY_PROPERTIES.contains(&decl.property.as_str()) => {
                applies.push(decl.value.text().to_string());
            }
            other => rest.children.push(other.clone()),
        }
    }
    applies.retain(|utilities| !utilities.is_empty());

    if !applies.is_empty() {
        let utilities = applies.join(" ");
        debug!(class = %class, utilities = %utilities, "shortcut");
        config.shortcuts.insert(class, utilities);
    }
    if !rest.children.is_empty() {
        config.preflights.push(Preflight::raw(
            LAYER_UTILITIES,
            format!("{}{}", selector, generate_block(&rest)),
        ));
    }
}

/// Any other selector is reproduced verbatim as a preflight.
fn raw_rule(config: &mut Configuration, selector: &str, block: &Block) {
    if block.children.is_empty() {
        return;
    }
    config.preflights.push(Preflight::raw(
        LAYER_PREFLIGHTS,
        format!("{}{}", selector, generate_block(block)),
    ));
}
