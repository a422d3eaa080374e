//! Wind and uno presets: mini plus the Tailwind-compatible extras.
//!
//! Copyright (c) 2025 Posit, PBC

use std::sync::Arc;

use atomcss_engine::{Declarations, Preset, Rule, RuleOutput, Theme, ThemeScope, Variant};

use crate::color::{color_declarations, resolve_color};
use crate::mini::rules::spacing_value;
use crate::mini::{PresetMini, default_theme};

const SIBLINGS: &str = "$$>:not([hidden])~:not([hidden])";

const TRANSITIONS: &[(&str, &str)] = &[
    (
        "DEFAULT",
        "color,background-color,border-color,text-decoration-color,fill,stroke,opacity,box-shadow,transform,filter,backdrop-filter",
    ),
    (
        "colors",
        "color,background-color,border-color,text-decoration-color,fill,stroke",
    ),
    ("opacity", "opacity"),
    ("shadow", "box-shadow"),
    ("transform", "transform"),
    ("all", "all"),
];

fn decl(property: &str, value: impl Into<String>) -> (String, String) {
    (property.to_string(), value.into())
}

fn milliseconds(theme: &Theme, raw: &str) -> Option<String> {
    if let Some(value) = theme.get(ThemeScope::Duration, raw) {
        return Some(value.to_string());
    }
    raw.parse::<u32>().ok().map(|n| format!("{}ms", n))
}

fn wind_theme() -> Theme {
    let mut theme = default_theme();
    for (key, value) in TRANSITIONS {
        theme.insert(ThemeScope::TransitionProperty, *key, *value);
    }
    theme.insert(ThemeScope::Duration, "DEFAULT", "150ms");
    for ms in ["75", "100", "150", "200", "300", "500", "700", "1000"] {
        theme.insert(ThemeScope::Duration, ms, format!("{}ms", ms));
    }
    for (key, value) in [("DEFAULT", "3px"), ("0", "0px"), ("1", "1px"), ("2", "2px"), ("4", "4px"), ("8", "8px")] {
        theme.insert(ThemeScope::RingWidth, key, value);
    }
    theme
}

fn wind_rules() -> Vec<Rule> {
    vec![
        Rule::fixed_output(
            "container",
            RuleOutput::from_pairs(&[("width", "100%")]),
        ),
        Rule::dynamic(r"transition(?:-(.+))?", |caps, theme| {
            let key = caps.get(1).map_or("DEFAULT", |m| m.as_str());
            if key == "none" {
                return Some(RuleOutput::from_pairs(&[("transition-property", "none")]));
            }
            let property = theme.get(ThemeScope::TransitionProperty, key)?;
            let easing = theme
                .get(ThemeScope::Easing, "DEFAULT")
                .unwrap_or("ease");
            let duration = theme.get(ThemeScope::Duration, "DEFAULT").unwrap_or("150ms");
            Some(RuleOutput::new(vec![
                decl("transition-property", property),
                decl("transition-timing-function", easing),
                decl("transition-duration", duration),
            ]))
        }),
        Rule::dynamic(r"duration-(.+)", |caps, theme| {
            let value = milliseconds(theme, &caps[1])?;
            Some(RuleOutput::new(vec![decl("transition-duration", value)]))
        }),
        Rule::dynamic(r"delay-(.+)", |caps, theme| {
            let value = milliseconds(theme, &caps[1])?;
            Some(RuleOutput::new(vec![decl("transition-delay", value)]))
        }),
        Rule::dynamic(r"ease(?:-(.+))?", |caps, theme| {
            let key = caps.get(1).map_or("DEFAULT", |m| m.as_str());
            let value = theme.get(ThemeScope::Easing, key)?;
            Some(RuleOutput::new(vec![decl("transition-timing-function", value)]))
        }),
        Rule::dynamic(r"space-(x|y)-(.+)", |caps, theme| {
            let value = spacing_value(theme, &caps[2])?;
            let nested: Declarations = if &caps[1] == "x" {
                vec![
                    decl("--un-space-x-reverse", "0"),
                    decl(
                        "margin-left",
                        format!("calc({} * calc(1 - var(--un-space-x-reverse)))", value),
                    ),
                    decl(
                        "margin-right",
                        format!("calc({} * var(--un-space-x-reverse))", value),
                    ),
                ]
            } else {
                vec![
                    decl("--un-space-y-reverse", "0"),
                    decl(
                        "margin-top",
                        format!("calc({} * calc(1 - var(--un-space-y-reverse)))", value),
                    ),
                    decl(
                        "margin-bottom",
                        format!("calc({} * var(--un-space-y-reverse))", value),
                    ),
                ]
            };
            Some(RuleOutput::default().with_nested(SIBLINGS, nested))
        }),
        Rule::dynamic(r"divide-(x|y)(?:-(\d+))?", |caps, _| {
            let width = caps.get(2).map_or("1", |m| m.as_str());
            let nested = if &caps[1] == "x" {
                vec![
                    decl("border-left-width", format!("{}px", width)),
                    decl("border-right-width", "0"),
                ]
            } else {
                vec![
                    decl("border-top-width", format!("{}px", width)),
                    decl("border-bottom-width", "0"),
                ]
            };
            Some(RuleOutput::default().with_nested(SIBLINGS, nested))
        }),
        Rule::dynamic(r"divide-(.+)", |caps, theme| {
            let (value, opacity) = resolve_color(theme, &caps[1])?;
            let nested = color_declarations("border-color", "divide", value, opacity)?;
            Some(RuleOutput::default().with_nested(SIBLINGS, nested))
        }),
        Rule::dynamic(r"ring(?:-(\d+))?", |caps, theme| {
            let key = caps.get(1).map_or("DEFAULT", |m| m.as_str());
            let width = theme.get(ThemeScope::RingWidth, key)?;
            Some(RuleOutput::new(vec![
                decl(
                    "--un-ring-shadow",
                    format!(
                        "var(--un-ring-inset) 0 0 0 calc({} + var(--un-ring-offset-width)) var(--un-ring-color)",
                        width
                    ),
                ),
                decl("box-shadow", "var(--un-ring-offset-shadow), var(--un-ring-shadow), var(--un-shadow, 0 0 #0000)"),
            ]))
        }),
        Rule::dynamic(r"ring-(.+)", |caps, theme| {
            let (value, opacity) = resolve_color(theme, &caps[1])?;
            color_declarations("--un-ring-color", "ring", value, opacity).map(RuleOutput::new)
        }),
    ]
}

/// Mini plus transitions, sibling spacing, dividers and rings.
#[derive(Debug, Clone)]
pub struct PresetWind {
    name: &'static str,
}

impl PresetWind {
    pub fn wind() -> Self {
        Self {
            name: "preset-wind",
        }
    }

    /// The default preset; identical utilities under its own name.
    pub fn uno() -> Self {
        Self { name: "preset-uno" }
    }
}

impl Preset for PresetWind {
    fn name(&self) -> &str {
        self.name
    }

    fn theme(&self) -> Theme {
        wind_theme()
    }

    fn rules(&self) -> Vec<Rule> {
        let mut rules = PresetMini.rules();
        rules.extend(wind_rules());
        rules
    }

    fn variants(&self) -> Vec<Arc<dyn Variant>> {
        PresetMini.variants()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atomcss_engine::{GenerateOptions, Generator, UserConfig};
    use std::collections::BTreeSet;

    async fn generate(tokens: &[&str]) -> String {
        let generator = Generator::new(UserConfig {
            presets: vec![Arc::new(PresetWind::uno())],
            ..Default::default()
        });
        let tokens: BTreeSet<String> = tokens.iter().map(|s| s.to_string()).collect();
        generator
            .generate(&tokens, &GenerateOptions::default())
            .await
            .unwrap()
            .css
    }

    #[tokio::test]
    async fn test_space_x_uses_sibling_selector() {
        let css = generate(&["space-x-4"]).await;
        assert!(css.contains(".space-x-4>:not([hidden])~:not([hidden]){--un-space-x-reverse:0;"));
        assert!(css.contains("margin-left:calc(1rem * calc(1 - var(--un-space-x-reverse)));"));
    }

    #[tokio::test]
    async fn test_transition_defaults() {
        let css = generate(&["transition-colors", "duration-300"]).await;
        assert!(css.contains(
            ".transition-colors{transition-property:color,background-color,border-color,text-decoration-color,fill,stroke;transition-timing-function:cubic-bezier(0.4, 0, 0.2, 1);transition-duration:150ms;}"
        ));
        assert!(css.contains(".duration-300{transition-duration:300ms;}"));
    }

    #[tokio::test]
    async fn test_includes_mini_rules() {
        let css = generate(&["flex", "md:p-2"]).await;
        assert!(css.contains(".flex{display:flex;}"));
        assert!(css.contains("@media (min-width: 768px){.md\\:p-2{padding:0.5rem;}}"));
    }
}
