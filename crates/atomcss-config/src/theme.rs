//! Theme block compilation.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Custom properties inside `@theme { ... }` (or a `:theme` rule) become
//! theme entries. `--<scope>-<key>` lands in `theme.<scope>.<key>`, with keys
//! camel-cased; unrecognized properties are ignored.

use atomcss_engine::{AnimationKind, Theme, ThemeScope};
use atomcss_syntax::{Block, Declaration, Node, ValueKind, Visit, camel_case, walk_children};
use indexmap::IndexMap;
use tracing::trace;

/// Function names marking a font family as a web font.
const WEB_FONT_MARKERS: &[&str] = &["webfont", "font"];

/// Properties with a fixed destination, checked before the generic scopes.
const DIRECT: &[(&str, Destination)] = &[
    ("--color-", Destination::Scope(ThemeScope::Colors)),
    ("--breakpoint-", Destination::Scope(ThemeScope::Breakpoints)),
    (
        "--vertical-breakpoint-",
        Destination::Scope(ThemeScope::VerticalBreakpoints),
    ),
    (
        "--animation-duration-",
        Destination::Animation(AnimationKind::Durations),
    ),
    (
        "--animation-timing-",
        Destination::Animation(AnimationKind::TimingFns),
    ),
    (
        "--animation-count-",
        Destination::Animation(AnimationKind::Counts),
    ),
];

#[derive(Debug, Clone, Copy)]
enum Destination {
    Scope(ThemeScope),
    Animation(AnimationKind),
}

/// Writes theme declarations into a theme and the web-font table.
pub(crate) struct ThemeCompiler<'a> {
    pub theme: &'a mut Theme,
    pub web_fonts: &'a mut IndexMap<String, Vec<String>>,
}

impl ThemeCompiler<'_> {
    /// Compile every declaration of a theme block, including nested ones.
    pub fn block(&mut self, block: &Block) {
        walk_children(&block.children, &mut |node| match node {
            Node::Declaration(decl) => {
                self.declaration(decl);
                Visit::Skip
            }
            _ => Visit::Continue,
        });
    }

    pub fn declaration(&mut self, decl: &Declaration) {
        let property = decl.property.as_str();
        let value = decl.value.text();

        let direct = DIRECT.iter().find_map(|(prefix, destination)| {
            property
                .strip_prefix(prefix)
                .filter(|key| !key.is_empty())
                .map(|key| (*destination, key))
        });
        match direct {
            Some((Destination::Scope(scope), key)) => {
                self.theme.insert(scope, camel_case(key), value);
                return;
            }
            Some((Destination::Animation(kind), key)) => {
                self.theme.insert_animation(kind, camel_case(key), value);
                return;
            }
            None => {}
        }

        match ThemeScope::match_property(property) {
            Some((ThemeScope::FontFamily, key)) => self.font_family(decl, camel_case(key)),
            Some((scope, key)) => self.theme.insert(scope, camel_case(key), value),
            None => trace!(property = %property, "ignoring unrecognized theme property"),
        }
    }

    /// `--font-family-<key>`: `webfont(...)` items go to the web-font table,
    /// plain items to `theme.fontFamily`.
    fn font_family(&mut self, decl: &Declaration, key: String) {
        let mut fonts = Vec::new();
        let mut plain = Vec::new();
        for item in &decl.value.items {
            match &item.kind {
                ValueKind::Function { name, args } if WEB_FONT_MARKERS.contains(&name.as_str()) => {
                    if let Some(descriptor) = web_font_descriptor(args) {
                        fonts.push(descriptor);
                    }
                }
                _ => plain.push(item.to_css()),
            }
        }

        if !fonts.is_empty() {
            self.web_fonts.insert(key.clone(), fonts);
        }
        if !plain.is_empty() {
            self.theme.insert(ThemeScope::FontFamily, key, plain.join(","));
        }
    }
}

/// `webfont("Inter", 400, 700)` -> `Inter:400,700`.
fn web_font_descriptor(args: &[String]) -> Option<String> {
    let (family, weights) = args.split_first()?;
    let family = family.trim();
    if family.is_empty() {
        return None;
    }
    if weights.is_empty() {
        Some(family.to_string())
    } else {
        Some(format!("{}:{}", family, weights.join(",")))
    }
}
