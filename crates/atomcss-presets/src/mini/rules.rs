//! Core utility rules.
//!
//! Copyright (c) 2025 Posit, PBC

use atomcss_engine::{Declarations, Rule, RuleOutput, Theme, ThemeScope};
use atomcss_syntax::camel_case;

use crate::color::{color_declarations, format_number, opacity_value, resolve_color};

fn decl(property: &str, value: impl Into<String>) -> (String, String) {
    (property.to_string(), value.into())
}

/// `[1fr_2fr]` -> `1fr 2fr`.
pub fn arbitrary(raw: &str) -> Option<String> {
    raw.strip_prefix('[')
        .and_then(|r| r.strip_suffix(']'))
        .filter(|r| !r.is_empty())
        .map(|r| r.replace('_', " "))
}

/// Spacing scale: theme `spacing`, `px`, arbitrary values, or quarter rems.
pub fn spacing_value(theme: &Theme, raw: &str) -> Option<String> {
    if let Some(value) = theme.get(ThemeScope::Spacing, raw) {
        return Some(value.to_string());
    }
    if let Some(value) = arbitrary(raw) {
        return Some(value);
    }
    match raw {
        "px" => Some("1px".to_string()),
        "0" => Some("0".to_string()),
        _ => {
            let n: f64 = raw.parse().ok()?;
            (n >= 0.0).then(|| format!("{}rem", format_number(n / 4.0)))
        }
    }
}

fn percent(numerator: &str, denominator: &str) -> Option<String> {
    let a: f64 = numerator.parse().ok()?;
    let b: f64 = denominator.parse().ok()?;
    if b == 0.0 {
        return None;
    }
    let rounded = format!("{:.10}", a / b * 100.0);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    Some(format!("{}%", trimmed))
}

/// Width/height style values.
pub fn size_value(theme: &Theme, scope: ThemeScope, raw: &str, vertical: bool) -> Option<String> {
    if let Some(value) = theme.get(scope, raw) {
        return Some(value.to_string());
    }
    match raw {
        "full" => return Some("100%".to_string()),
        "screen" => return Some(if vertical { "100vh" } else { "100vw" }.to_string()),
        "auto" => return Some("auto".to_string()),
        "min" => return Some("min-content".to_string()),
        "max" => return Some("max-content".to_string()),
        "fit" => return Some("fit-content".to_string()),
        _ => {}
    }
    if let Some((a, b)) = raw.split_once('/') {
        return percent(a, b);
    }
    spacing_value(theme, raw)
}

const DISPLAY: &[(&str, &str)] = &[
    ("block", "block"),
    ("inline-block", "inline-block"),
    ("inline", "inline"),
    ("flex", "flex"),
    ("inline-flex", "inline-flex"),
    ("grid", "grid"),
    ("inline-grid", "inline-grid"),
    ("table", "table"),
    ("flow-root", "flow-root"),
    ("contents", "contents"),
    ("hidden", "none"),
];

const STATIC: &[(&str, &str, &str)] = &[
    ("static", "position", "static"),
    ("fixed", "position", "fixed"),
    ("absolute", "position", "absolute"),
    ("relative", "position", "relative"),
    ("sticky", "position", "sticky"),
    ("flex-row", "flex-direction", "row"),
    ("flex-row-reverse", "flex-direction", "row-reverse"),
    ("flex-col", "flex-direction", "column"),
    ("flex-col-reverse", "flex-direction", "column-reverse"),
    ("flex-wrap", "flex-wrap", "wrap"),
    ("flex-wrap-reverse", "flex-wrap", "wrap-reverse"),
    ("flex-nowrap", "flex-wrap", "nowrap"),
    ("flex-1", "flex", "1 1 0%"),
    ("flex-auto", "flex", "1 1 auto"),
    ("flex-initial", "flex", "0 1 auto"),
    ("flex-none", "flex", "none"),
    ("grow", "flex-grow", "1"),
    ("grow-0", "flex-grow", "0"),
    ("shrink", "flex-shrink", "1"),
    ("shrink-0", "flex-shrink", "0"),
    ("items-start", "align-items", "flex-start"),
    ("items-end", "align-items", "flex-end"),
    ("items-center", "align-items", "center"),
    ("items-baseline", "align-items", "baseline"),
    ("items-stretch", "align-items", "stretch"),
    ("justify-start", "justify-content", "flex-start"),
    ("justify-end", "justify-content", "flex-end"),
    ("justify-center", "justify-content", "center"),
    ("justify-between", "justify-content", "space-between"),
    ("justify-around", "justify-content", "space-around"),
    ("justify-evenly", "justify-content", "space-evenly"),
    ("self-auto", "align-self", "auto"),
    ("self-start", "align-self", "flex-start"),
    ("self-end", "align-self", "flex-end"),
    ("self-center", "align-self", "center"),
    ("text-left", "text-align", "left"),
    ("text-center", "text-align", "center"),
    ("text-right", "text-align", "right"),
    ("text-justify", "text-align", "justify"),
    ("italic", "font-style", "italic"),
    ("not-italic", "font-style", "normal"),
    ("underline", "text-decoration-line", "underline"),
    ("line-through", "text-decoration-line", "line-through"),
    ("no-underline", "text-decoration", "none"),
    ("uppercase", "text-transform", "uppercase"),
    ("lowercase", "text-transform", "lowercase"),
    ("capitalize", "text-transform", "capitalize"),
    ("normal-case", "text-transform", "none"),
    ("whitespace-nowrap", "white-space", "nowrap"),
    ("whitespace-normal", "white-space", "normal"),
    ("whitespace-pre", "white-space", "pre"),
    ("overflow-auto", "overflow", "auto"),
    ("overflow-hidden", "overflow", "hidden"),
    ("overflow-visible", "overflow", "visible"),
    ("overflow-scroll", "overflow", "scroll"),
    ("cursor-pointer", "cursor", "pointer"),
    ("cursor-default", "cursor", "default"),
    ("pointer-events-none", "pointer-events", "none"),
    ("select-none", "user-select", "none"),
    ("border-solid", "border-style", "solid"),
    ("border-dashed", "border-style", "dashed"),
    ("border-dotted", "border-style", "dotted"),
    ("border-none", "border-style", "none"),
    ("box-border", "box-sizing", "border-box"),
    ("box-content", "box-sizing", "content-box"),
    ("visible", "visibility", "visible"),
    ("invisible", "visibility", "hidden"),
];

fn side_properties(prefix: &str, side: Option<&str>) -> Option<Vec<String>> {
    let sides: &[&str] = match side {
        None => &[""],
        Some("x") => &["-left", "-right"],
        Some("y") => &["-top", "-bottom"],
        Some("t") => &["-top"],
        Some("r") => &["-right"],
        Some("b") => &["-bottom"],
        Some("l") => &["-left"],
        Some("s") => &["-inline-start"],
        Some("e") => &["-inline-end"],
        Some(_) => return None,
    };
    Some(sides.iter().map(|s| format!("{}{}", prefix, s)).collect())
}

fn text_size(theme: &Theme, raw: &str) -> Option<Declarations> {
    if let Some(value) = theme.get(ThemeScope::FontSize, raw) {
        return Some(match value.split_once('/') {
            Some((size, line_height)) => vec![
                decl("font-size", size),
                decl("line-height", line_height),
            ],
            None => vec![decl("font-size", value)],
        });
    }
    arbitrary(raw)
        .filter(|v| v.chars().next().is_some_and(|c| c.is_ascii_digit() || c == '.'))
        .map(|v| vec![decl("font-size", v)])
}

fn is_color_literal(value: &str) -> bool {
    ["#", "rgb", "hsl", "oklch", "var("]
        .iter()
        .any(|prefix| value.starts_with(prefix))
}

fn color_rule(pattern: &str, property: &'static str, opacity_var: &'static str) -> Rule {
    Rule::dynamic(pattern, move |caps, theme| {
        let body = &caps[1];
        if let Some(value) = arbitrary(body).filter(|v| is_color_literal(v)) {
            return Some(RuleOutput::new(vec![decl(property, value)]));
        }
        let (value, opacity) = resolve_color(theme, body)?;
        color_declarations(property, opacity_var, value, opacity).map(RuleOutput::new)
    })
}

/// Theme animation keys are camel-cased, so `animate-fade-in` finds `fadeIn`.
fn animation(theme: &Theme, name: &str) -> Option<RuleOutput> {
    let animation = &theme.animation;
    let key = if animation.keyframes.contains_key(name) {
        name.to_string()
    } else {
        camel_case(name)
    };
    let Some(keyframes) = animation.keyframes.get(&key) else {
        return arbitrary(name).map(|v| RuleOutput::new(vec![decl("animation", v)]));
    };
    let duration = animation.durations.get(&key).map_or("1s", String::as_str);
    let timing = animation.timing_fns.get(&key).map_or("linear", String::as_str);
    let count = animation.counts.get(&key).map_or("infinite", String::as_str);
    Some(
        RuleOutput::new(vec![decl(
            "animation",
            format!("{} {} {} {}", name, duration, timing, count),
        )])
        .with_global(format!("@keyframes {}{}", name, keyframes)),
    )
}

/// All rules of the mini preset, lowest precedence first.
pub fn rules() -> Vec<Rule> {
    let mut rules = Vec::new();

    for (name, value) in DISPLAY {
        rules.push(Rule::fixed(*name, &[("display", *value)]));
    }
    for (name, property, value) in STATIC {
        rules.push(Rule::fixed(*name, &[(*property, *value)]));
    }
    rules.push(Rule::fixed(
        "truncate",
        &[
            ("overflow", "hidden"),
            ("text-overflow", "ellipsis"),
            ("white-space", "nowrap"),
        ],
    ));
    rules.push(Rule::fixed(
        "sr-only",
        &[
            ("position", "absolute"),
            ("width", "1px"),
            ("height", "1px"),
            ("padding", "0"),
            ("margin", "-1px"),
            ("overflow", "hidden"),
            ("clip", "rect(0,0,0,0)"),
            ("white-space", "nowrap"),
            ("border-width", "0"),
        ],
    ));

    // spacing
    rules.push(Rule::dynamic(r"(-?)(m|p)([xytrblse])?-(.+)", |caps, theme| {
        let negative = !caps[1].is_empty();
        let property = if &caps[2] == "m" { "margin" } else { "padding" };
        let raw = &caps[4];
        let value = if property == "margin" && raw == "auto" {
            "auto".to_string()
        } else {
            spacing_value(theme, raw)?
        };
        let value = match (negative, property) {
            (false, _) => value,
            (true, "margin") if value != "auto" && value != "0" => format!("calc({} * -1)", value),
            _ => return None,
        };
        let properties = side_properties(property, caps.get(3).map(|m| m.as_str()))?;
        Some(RuleOutput::new(
            properties.into_iter().map(|p| (p, value.clone())).collect(),
        ))
    }));
    rules.push(Rule::dynamic(r"gap(?:-([xy]))?-(.+)", |caps, theme| {
        let property = match caps.get(1).map(|m| m.as_str()) {
            Some("x") => "column-gap",
            Some("y") => "row-gap",
            _ => "gap",
        };
        Some(RuleOutput::new(vec![decl(
            property,
            spacing_value(theme, &caps[2])?,
        )]))
    }));
    rules.push(Rule::dynamic(
        r"(-?)(inset|top|right|bottom|left)-(.+)",
        |caps, theme| {
            let raw = &caps[3];
            let value = match raw {
                "auto" => "auto".to_string(),
                "full" => "100%".to_string(),
                _ => size_value(theme, ThemeScope::Spacing, raw, false)?,
            };
            let value = if caps[1].is_empty() {
                value
            } else {
                format!("calc({} * -1)", value)
            };
            Some(RuleOutput::new(vec![decl(&caps[2], value)]))
        },
    ));

    // sizing
    rules.push(Rule::dynamic(r"(min-|max-)?(w|h)-(.+)", |caps, theme| {
        let vertical = &caps[2] == "h";
        let (scope, property) = match (caps.get(1).map(|m| m.as_str()), vertical) {
            (None, false) => (ThemeScope::Width, "width"),
            (None, true) => (ThemeScope::Height, "height"),
            (Some("min-"), false) => (ThemeScope::MinWidth, "min-width"),
            (Some("min-"), true) => (ThemeScope::MinHeight, "min-height"),
            (_, false) => (ThemeScope::MaxWidth, "max-width"),
            (_, true) => (ThemeScope::MaxHeight, "max-height"),
        };
        let value = size_value(theme, scope, &caps[3], vertical)?;
        Some(RuleOutput::new(vec![decl(property, value)]))
    }));
    rules.push(Rule::dynamic(r"size-(.+)", |caps, theme| {
        let value = size_value(theme, ThemeScope::Width, &caps[1], false)?;
        Some(RuleOutput::new(vec![
            decl("width", value.clone()),
            decl("height", value),
        ]))
    }));

    // typography
    rules.push(Rule::dynamic(r"text-(.+)", |caps, theme| {
        text_size(theme, &caps[1]).map(RuleOutput::new)
    }));
    rules.push(color_rule(r"(?:text|c|color)-(.+)", "color", "text"));
    rules.push(Rule::dynamic(r"font-(.+)", |caps, theme| {
        let raw = &caps[1];
        if let Some(weight) = theme.get(ThemeScope::FontWeight, raw) {
            return Some(RuleOutput::new(vec![decl("font-weight", weight)]));
        }
        if raw.chars().all(|c| c.is_ascii_digit()) {
            return Some(RuleOutput::new(vec![decl("font-weight", raw)]));
        }
        None
    }));
    rules.push(Rule::dynamic(r"font-(.+)", |caps, theme| {
        let family = theme.get(ThemeScope::FontFamily, &caps[1])?;
        Some(RuleOutput::new(vec![decl("font-family", family)]))
    }));
    rules.push(Rule::dynamic(r"(?:leading|lh)-(.+)", |caps, theme| {
        let raw = &caps[1];
        let value = theme
            .get(ThemeScope::LineHeight, raw)
            .map(str::to_string)
            .or_else(|| spacing_value(theme, raw))?;
        Some(RuleOutput::new(vec![decl("line-height", value)]))
    }));
    rules.push(Rule::dynamic(r"tracking-(.+)", |caps, theme| {
        let raw = &caps[1];
        let value = theme
            .get(ThemeScope::LetterSpacing, raw)
            .map(str::to_string)
            .or_else(|| arbitrary(raw))?;
        Some(RuleOutput::new(vec![decl("letter-spacing", value)]))
    }));

    // backgrounds and borders
    rules.push(color_rule(r"bg-(.+)", "background-color", "bg"));
    rules.push(Rule::dynamic(r"border(?:-([xytrbl]))?(?:-(\d+|px))?", |caps, _| {
        let width = match caps.get(2).map(|m| m.as_str()) {
            None => "1px".to_string(),
            Some("px") => "1px".to_string(),
            Some(n) => format!("{}px", n),
        };
        let properties = side_properties("border", caps.get(1).map(|m| m.as_str()))?;
        Some(RuleOutput::new(
            properties
                .into_iter()
                .map(|p| (format!("{}-width", p), width.clone()))
                .collect(),
        ))
    }));
    rules.push(color_rule(r"border-(.+)", "border-color", "border"));
    rules.push(Rule::dynamic(r"rounded(?:-(.+))?", |caps, theme| {
        let key = caps.get(1).map_or("DEFAULT", |m| m.as_str());
        let value = theme
            .get(ThemeScope::BorderRadius, key)
            .map(str::to_string)
            .or_else(|| arbitrary(key))?;
        Some(RuleOutput::new(vec![decl("border-radius", value)]))
    }));

    // effects
    rules.push(Rule::dynamic(r"opacity-(.+)", |caps, _| {
        let value = opacity_value(&caps[1])?;
        Some(RuleOutput::new(vec![decl("opacity", value)]))
    }));
    rules.push(Rule::dynamic(r"shadow(?:-(.+))?", |caps, theme| {
        let key = caps.get(1).map_or("DEFAULT", |m| m.as_str());
        let value = theme.get(ThemeScope::BoxShadow, key)?;
        Some(RuleOutput::new(vec![decl("box-shadow", value)]))
    }));
    rules.push(Rule::dynamic(r"(-?)z-(.+)", |caps, theme| {
        let raw = &caps[2];
        let value = match theme.get(ThemeScope::ZIndex, raw) {
            Some(value) => value.to_string(),
            None if raw == "auto" => raw.to_string(),
            None => raw.parse::<i64>().ok()?.to_string(),
        };
        let value = if caps[1].is_empty() {
            value
        } else {
            format!("-{}", value)
        };
        Some(RuleOutput::new(vec![decl("z-index", value)]))
    }));
    rules.push(Rule::dynamic(r"animate-(.+)", |caps, theme| {
        animation(theme, &caps[1])
    }));

    rules
}
