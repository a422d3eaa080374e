//! Typed theme model.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! A theme is a set of scopes (colors, spacing, breakpoints, ...) each holding
//! a flat `key -> value` map, plus the animation sub-tree. Scopes are a closed
//! enum so that presets and the configuration compiler cannot disagree on a
//! scope name; unknown custom properties are dropped by the caller instead.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Recognized theme scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeScope {
    Width,
    Height,
    MaxWidth,
    MaxHeight,
    MinWidth,
    MinHeight,
    InlineSize,
    BlockSize,
    MaxInlineSize,
    MaxBlockSize,
    MinInlineSize,
    MinBlockSize,
    Colors,
    FontFamily,
    FontSize,
    FontWeight,
    Breakpoints,
    VerticalBreakpoints,
    BorderRadius,
    LineHeight,
    LetterSpacing,
    WordSpacing,
    BoxShadow,
    TextIndent,
    TextShadow,
    TextStrokeWidth,
    Blur,
    DropShadow,
    Easing,
    TransitionProperty,
    LineWidth,
    Spacing,
    Duration,
    RingWidth,
    ZIndex,
    Containers,
    Media,
    Supports,
    Aria,
    Data,
    GridAutoColumn,
    GridAutoRow,
    GridColumn,
    GridRow,
    GridTemplateColumn,
    GridTemplateRow,
    Container,
}

impl ThemeScope {
    /// All scopes, in declaration order.
    pub fn all() -> &'static [ThemeScope] {
        use ThemeScope::*;
        &[
            Width,
            Height,
            MaxWidth,
            MaxHeight,
            MinWidth,
            MinHeight,
            InlineSize,
            BlockSize,
            MaxInlineSize,
            MaxBlockSize,
            MinInlineSize,
            MinBlockSize,
            Colors,
            FontFamily,
            FontSize,
            FontWeight,
            Breakpoints,
            VerticalBreakpoints,
            BorderRadius,
            LineHeight,
            LetterSpacing,
            WordSpacing,
            BoxShadow,
            TextIndent,
            TextShadow,
            TextStrokeWidth,
            Blur,
            DropShadow,
            Easing,
            TransitionProperty,
            LineWidth,
            Spacing,
            Duration,
            RingWidth,
            ZIndex,
            Containers,
            Media,
            Supports,
            Aria,
            Data,
            GridAutoColumn,
            GridAutoRow,
            GridColumn,
            GridRow,
            GridTemplateColumn,
            GridTemplateRow,
            Container,
        ]
    }

    /// The kebab-case name used in custom properties (`--font-family-*`).
    pub fn prefix(&self) -> &'static str {
        match self {
            ThemeScope::Width => "width",
            ThemeScope::Height => "height",
            ThemeScope::MaxWidth => "max-width",
            ThemeScope::MaxHeight => "max-height",
            ThemeScope::MinWidth => "min-width",
            ThemeScope::MinHeight => "min-height",
            ThemeScope::InlineSize => "inline-size",
            ThemeScope::BlockSize => "block-size",
            ThemeScope::MaxInlineSize => "max-inline-size",
            ThemeScope::MaxBlockSize => "max-block-size",
            ThemeScope::MinInlineSize => "min-inline-size",
            ThemeScope::MinBlockSize => "min-block-size",
            ThemeScope::Colors => "colors",
            ThemeScope::FontFamily => "font-family",
            ThemeScope::FontSize => "font-size",
            ThemeScope::FontWeight => "font-weight",
            ThemeScope::Breakpoints => "breakpoints",
            ThemeScope::VerticalBreakpoints => "vertical-breakpoints",
            ThemeScope::BorderRadius => "border-radius",
            ThemeScope::LineHeight => "line-height",
            ThemeScope::LetterSpacing => "letter-spacing",
            ThemeScope::WordSpacing => "word-spacing",
            ThemeScope::BoxShadow => "box-shadow",
            ThemeScope::TextIndent => "text-indent",
            ThemeScope::TextShadow => "text-shadow",
            ThemeScope::TextStrokeWidth => "text-stroke-width",
            ThemeScope::Blur => "blur",
            ThemeScope::DropShadow => "drop-shadow",
            ThemeScope::Easing => "easing",
            ThemeScope::TransitionProperty => "transition-property",
            ThemeScope::LineWidth => "line-width",
            ThemeScope::Spacing => "spacing",
            ThemeScope::Duration => "duration",
            ThemeScope::RingWidth => "ring-width",
            ThemeScope::ZIndex => "z-index",
            ThemeScope::Containers => "containers",
            ThemeScope::Media => "media",
            ThemeScope::Supports => "supports",
            ThemeScope::Aria => "aria",
            ThemeScope::Data => "data",
            ThemeScope::GridAutoColumn => "grid-auto-column",
            ThemeScope::GridAutoRow => "grid-auto-row",
            ThemeScope::GridColumn => "grid-column",
            ThemeScope::GridRow => "grid-row",
            ThemeScope::GridTemplateColumn => "grid-template-column",
            ThemeScope::GridTemplateRow => "grid-template-row",
            ThemeScope::Container => "container",
        }
    }

    /// Split a custom property `--<scope>-<rest>` into its scope and rest.
    ///
    /// Returns `None` for properties naming no recognized scope.
    pub fn match_property(property: &str) -> Option<(ThemeScope, &str)> {
        let body = property.strip_prefix("--")?;
        ThemeScope::all().iter().find_map(|scope| {
            body.strip_prefix(scope.prefix())
                .and_then(|rest| rest.strip_prefix('-'))
                .filter(|rest| !rest.is_empty())
                .map(|rest| (*scope, rest))
        })
    }
}

impl std::fmt::Display for ThemeScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// The animation branch of the theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationTheme {
    /// Keyframe bodies including braces, emitted as `@keyframes <name><body>`.
    pub keyframes: BTreeMap<String, String>,
    pub durations: BTreeMap<String, String>,
    pub timing_fns: BTreeMap<String, String>,
    pub counts: BTreeMap<String, String>,
}

/// Selects one map of [`AnimationTheme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    Keyframes,
    Durations,
    TimingFns,
    Counts,
}

impl AnimationTheme {
    pub fn entries(&self, kind: AnimationKind) -> &BTreeMap<String, String> {
        match kind {
            AnimationKind::Keyframes => &self.keyframes,
            AnimationKind::Durations => &self.durations,
            AnimationKind::TimingFns => &self.timing_fns,
            AnimationKind::Counts => &self.counts,
        }
    }

    pub fn entries_mut(&mut self, kind: AnimationKind) -> &mut BTreeMap<String, String> {
        match kind {
            AnimationKind::Keyframes => &mut self.keyframes,
            AnimationKind::Durations => &mut self.durations,
            AnimationKind::TimingFns => &mut self.timing_fns,
            AnimationKind::Counts => &mut self.counts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
            && self.durations.is_empty()
            && self.timing_fns.is_empty()
            && self.counts.is_empty()
    }
}

/// A complete theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(flatten)]
    scopes: BTreeMap<ThemeScope, BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "AnimationTheme::is_empty")]
    pub animation: AnimationTheme,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `scope.key = value`, replacing any earlier value.
    pub fn insert(&mut self, scope: ThemeScope, key: impl Into<String>, value: impl Into<String>) {
        self.scopes
            .entry(scope)
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Set `animation.<kind>.key = value`, replacing any earlier value.
    pub fn insert_animation(
        &mut self,
        kind: AnimationKind,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.animation
            .entries_mut(kind)
            .insert(key.into(), value.into());
    }

    pub fn get(&self, scope: ThemeScope, key: &str) -> Option<&str> {
        self.scopes
            .get(&scope)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    pub fn scope(&self, scope: ThemeScope) -> Option<&BTreeMap<String, String>> {
        self.scopes.get(&scope)
    }

    /// Iterate every populated scope.
    pub fn scopes(&self) -> impl Iterator<Item = (ThemeScope, &BTreeMap<String, String>)> {
        self.scopes.iter().map(|(scope, entries)| (*scope, entries))
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.values().all(BTreeMap::is_empty) && self.animation.is_empty()
    }

    /// Overlay `other` on top of this theme, key by key.
    pub fn merge(&mut self, other: &Theme) {
        for (scope, entries) in &other.scopes {
            let target = self.scopes.entry(*scope).or_default();
            for (key, value) in entries {
                target.insert(key.clone(), value.clone());
            }
        }
        for kind in [
            AnimationKind::Keyframes,
            AnimationKind::Durations,
            AnimationKind::TimingFns,
            AnimationKind::Counts,
        ] {
            let target = self.animation.entries_mut(kind);
            for (key, value) in other.animation.entries(kind) {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_property_generic_scope() {
        assert_eq!(
            ThemeScope::match_property("--spacing-gutter"),
            Some((ThemeScope::Spacing, "gutter"))
        );
        assert_eq!(
            ThemeScope::match_property("--max-width-prose"),
            Some((ThemeScope::MaxWidth, "prose"))
        );
        assert_eq!(
            ThemeScope::match_property("--width-prose"),
            Some((ThemeScope::Width, "prose"))
        );
        assert_eq!(
            ThemeScope::match_property("--font-family-sans"),
            Some((ThemeScope::FontFamily, "sans"))
        );
    }

    #[test]
    fn test_match_property_unknown() {
        assert_eq!(ThemeScope::match_property("--nonsense-x"), None);
        assert_eq!(ThemeScope::match_property("--spacing"), None);
        assert_eq!(ThemeScope::match_property("--spacing-"), None);
        assert_eq!(ThemeScope::match_property("spacing-x"), None);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut theme = Theme::new();
        theme.insert(ThemeScope::Colors, "primary", "#000");
        theme.insert(ThemeScope::Colors, "primary", "#fff");
        assert_eq!(theme.get(ThemeScope::Colors, "primary"), Some("#fff"));
    }

    #[test]
    fn test_merge_overlays_keys() {
        let mut base = Theme::new();
        base.insert(ThemeScope::Colors, "red", "#f00");
        base.insert(ThemeScope::Colors, "blue", "#00f");
        base.insert_animation(AnimationKind::Durations, "spin", "1s");

        let mut user = Theme::new();
        user.insert(ThemeScope::Colors, "red", "#e00");
        user.insert_animation(AnimationKind::Durations, "spin", "2s");

        base.merge(&user);
        assert_eq!(base.get(ThemeScope::Colors, "red"), Some("#e00"));
        assert_eq!(base.get(ThemeScope::Colors, "blue"), Some("#00f"));
        assert_eq!(base.animation.durations["spin"], "2s");
    }

    #[test]
    fn test_serialize_camel_case_scopes() {
        let mut theme = Theme::new();
        theme.insert(ThemeScope::FontFamily, "sans", "Inter");
        theme.insert_animation(AnimationKind::TimingFns, "spin", "ease");
        let json = serde_json::to_value(&theme).unwrap();
        assert_eq!(json["fontFamily"]["sans"], "Inter");
        assert_eq!(json["animation"]["timingFns"]["spin"], "ease");
    }
}
