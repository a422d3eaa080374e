//! Typography preset: the `prose` utility.
//!
//! Copyright (c) 2025 Posit, PBC

use atomcss_engine::{Preset, Rule, RuleOutput, Theme, ThemeScope};

use crate::color::resolve_color;

/// Colors of the prose palette, as `(css variable, gray shade)`.
const PROSE_COLORS: &[(&str, &str)] = &[
    ("--un-prose-body", "700"),
    ("--un-prose-headings", "900"),
    ("--un-prose-links", "900"),
    ("--un-prose-lists", "400"),
    ("--un-prose-hr", "200"),
    ("--un-prose-captions", "500"),
    ("--un-prose-code", "900"),
    ("--un-prose-borders", "200"),
    ("--un-prose-bg-soft", "100"),
];

const ELEMENTS: &[(&str, &[(&str, &str)])] = &[
    (
        "h1",
        &[
            ("color", "var(--un-prose-headings)"),
            ("font-weight", "800"),
            ("font-size", "2.25em"),
            ("margin-top", "0"),
            ("margin-bottom", "0.8888889em"),
            ("line-height", "1.1111111"),
        ],
    ),
    (
        "h2",
        &[
            ("color", "var(--un-prose-headings)"),
            ("font-weight", "700"),
            ("font-size", "1.5em"),
            ("margin-top", "2em"),
            ("margin-bottom", "1em"),
            ("line-height", "1.3333333"),
        ],
    ),
    (
        "h3",
        &[
            ("color", "var(--un-prose-headings)"),
            ("font-weight", "600"),
            ("font-size", "1.25em"),
            ("margin-top", "1.6em"),
            ("margin-bottom", "0.6em"),
            ("line-height", "1.6"),
        ],
    ),
    ("p", &[("margin-top", "1.25em"), ("margin-bottom", "1.25em")]),
    (
        "a",
        &[
            ("color", "var(--un-prose-links)"),
            ("text-decoration", "underline"),
            ("font-weight", "500"),
        ],
    ),
    (
        "blockquote",
        &[
            ("font-weight", "500"),
            ("font-style", "italic"),
            ("color", "var(--un-prose-headings)"),
            ("border-left", ".25em solid var(--un-prose-borders)"),
            ("padding-left", "1em"),
        ],
    ),
    (
        "code",
        &[
            ("color", "var(--un-prose-code)"),
            ("font-size", "0.875em"),
            ("font-weight", "600"),
        ],
    ),
    (
        "pre",
        &[
            ("background", "var(--un-prose-bg-soft)"),
            ("overflow-x", "auto"),
            ("padding", "0.8571429em 1.1428571em"),
            ("border-radius", "0.375rem"),
        ],
    ),
    (
        "ul,ol",
        &[("padding-left", "1.625em"), ("margin-top", "1.25em"), ("margin-bottom", "1.25em")],
    ),
    ("li::marker", &[("color", "var(--un-prose-lists)")]),
    (
        "hr",
        &[
            ("border-color", "var(--un-prose-hr)"),
            ("margin-top", "3em"),
            ("margin-bottom", "3em"),
        ],
    ),
    (
        "figcaption",
        &[("color", "var(--un-prose-captions)"), ("font-size", "0.875em")],
    ),
];

fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(p, v)| (p.to_string(), v.to_string()))
        .collect()
}

fn prose(theme: &Theme, palette: &str) -> Option<RuleOutput> {
    let mut declarations = Vec::new();
    for (var, shade) in PROSE_COLORS {
        let key = format!("{}-{}", palette, shade);
        let (value, _) = resolve_color(theme, &key)?;
        declarations.push((var.to_string(), value.to_string()));
    }
    declarations.push(("color".to_string(), "var(--un-prose-body)".to_string()));
    declarations.push((
        "max-width".to_string(),
        theme
            .get(ThemeScope::MaxWidth, "prose")
            .unwrap_or("65ch")
            .to_string(),
    ));

    let mut output = RuleOutput::new(declarations);
    for (element, decls) in ELEMENTS {
        output = output.with_nested(
            format!(
                "$$ :where({}):not(:where(.not-prose,.not-prose *))",
                element
            ),
            owned(decls),
        );
    }
    Some(output)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PresetTypography;

impl Preset for PresetTypography {
    fn name(&self) -> &str {
        "preset-typography"
    }

    fn rules(&self) -> Vec<Rule> {
        vec![Rule::dynamic(r"prose(?:-(.+))?", |caps, theme| {
            prose(theme, caps.get(1).map_or("gray", |m| m.as_str()))
        })]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mini::default_theme;

    #[test]
    fn test_prose_nests_element_rules() {
        let rule = &PresetTypography.rules()[0];
        let output = rule.matches("prose", &default_theme()).unwrap();
        assert!(output.declarations.contains(&(
            "--un-prose-body".to_string(),
            "#374151".to_string()
        )));
        assert_eq!(output.nested.len(), ELEMENTS.len());
        assert_eq!(
            output.nested[0].0,
            "$$ :where(h1):not(:where(.not-prose,.not-prose *))"
        );
    }

    #[test]
    fn test_prose_palette() {
        let rule = &PresetTypography.rules()[0];
        let output = rule.matches("prose-slate", &default_theme()).unwrap();
        assert!(output.declarations.contains(&(
            "--un-prose-body".to_string(),
            "#334155".to_string()
        )));
        assert!(rule.matches("prose-nonsense", &default_theme()).is_none());
    }

    #[test]
    fn test_prose_needs_a_palette() {
        // without a color theme there is nothing to build the palette from
        let rule = &PresetTypography.rules()[0];
        assert!(rule.matches("prose", &Theme::new()).is_none());
    }
}
