//! Variants: prefixes that change where a utility applies.
//!
//! Copyright (c) 2025 Posit, PBC

use crate::theme::{Theme, ThemeScope};

/// How a matched variant changes the generated rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VariantApply {
    /// Appended to the selector (`:hover`)
    Pseudo(String),
    /// Ancestor selector placed before the selector (`.dark`)
    Parent(String),
    /// Media query the rule is wrapped in (`(min-width: 640px)`)
    Media(String),
    /// Replaces the class selector entirely (`[text~="lg"]`)
    Selector(String),
}

/// A successful variant match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantMatch {
    /// The token with the variant prefix removed
    pub rest: String,
    pub apply: VariantApply,
}

pub trait Variant: Send + Sync {
    fn name(&self) -> &str;

    /// Try to strip this variant from the front of `token`.
    fn match_variant(&self, token: &str, theme: &Theme) -> Option<VariantMatch>;
}

/// `<name>:` appends a pseudo-class.
#[derive(Debug, Clone)]
pub struct PseudoVariant {
    name: String,
    pseudo: String,
}

impl PseudoVariant {
    pub fn new(name: impl Into<String>, pseudo: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pseudo: pseudo.into(),
        }
    }
}

impl Variant for PseudoVariant {
    fn name(&self) -> &str {
        &self.name
    }

    fn match_variant(&self, token: &str, _theme: &Theme) -> Option<VariantMatch> {
        let rest = strip_variant_prefix(token, &self.name)?;
        Some(VariantMatch {
            rest: rest.to_string(),
            apply: VariantApply::Pseudo(self.pseudo.clone()),
        })
    }
}

/// `<name>:` scopes the utility under an ancestor selector.
#[derive(Debug, Clone)]
pub struct ParentVariant {
    name: String,
    parent: String,
}

impl ParentVariant {
    pub fn new(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: parent.into(),
        }
    }
}

impl Variant for ParentVariant {
    fn name(&self) -> &str {
        &self.name
    }

    fn match_variant(&self, token: &str, _theme: &Theme) -> Option<VariantMatch> {
        let rest = strip_variant_prefix(token, &self.name)?;
        Some(VariantMatch {
            rest: rest.to_string(),
            apply: VariantApply::Parent(self.parent.clone()),
        })
    }
}

/// Responsive variants built from `theme.breakpoints`.
///
/// - `md:` applies from the breakpoint up
/// - `lt-md:` applies below the breakpoint
/// - `at-md:` applies from the breakpoint up to the next one
#[derive(Debug, Clone, Copy, Default)]
pub struct BreakpointVariant;

impl Variant for BreakpointVariant {
    fn name(&self) -> &str {
        "breakpoints"
    }

    fn match_variant(&self, token: &str, theme: &Theme) -> Option<VariantMatch> {
        let (head, rest) = token.split_once(':')?;
        if rest.is_empty() {
            return None;
        }
        let breakpoints = sorted_breakpoints(theme);
        let (mode, name) = match head.split_once('-') {
            Some(("lt", name)) => ("lt", name),
            Some(("at", name)) => ("at", name),
            _ => ("min", head),
        };
        let idx = breakpoints.iter().position(|(key, _)| *key == name)?;
        let value = breakpoints[idx].1;
        let query = match mode {
            "lt" => format!("(max-width: calc({} - 0.1px))", value),
            "at" => match breakpoints.get(idx + 1) {
                Some((_, next)) => format!(
                    "(min-width: {}) and (max-width: calc({} - 0.1px))",
                    value, next
                ),
                None => format!("(min-width: {})", value),
            },
            _ => format!("(min-width: {})", value),
        };
        Some(VariantMatch {
            rest: rest.to_string(),
            apply: VariantApply::Media(query),
        })
    }
}

fn strip_variant_prefix<'a>(token: &'a str, name: &str) -> Option<&'a str> {
    token
        .strip_prefix(name)
        .and_then(|rest| rest.strip_prefix(':'))
        .filter(|rest| !rest.is_empty())
}

/// Breakpoints ordered by size, smallest first.
fn sorted_breakpoints(theme: &Theme) -> Vec<(&str, &str)> {
    let mut entries: Vec<(&str, &str)> = theme
        .scope(ThemeScope::Breakpoints)
        .map(|scope| {
            scope
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect()
        })
        .unwrap_or_default();
    entries.sort_by(|a, b| {
        let a = size_in_px(a.1).unwrap_or(f64::MAX);
        let b = size_in_px(b.1).unwrap_or(f64::MAX);
        a.total_cmp(&b)
    });
    entries
}

fn size_in_px(value: &str) -> Option<f64> {
    let value = value.trim();
    if let Some(n) = value.strip_suffix("px") {
        n.parse().ok()
    } else if let Some(n) = value.strip_suffix("rem").or_else(|| value.strip_suffix("em")) {
        n.parse::<f64>().ok().map(|n| n * 16.0)
    } else {
        value.parse().ok()
    }
}
