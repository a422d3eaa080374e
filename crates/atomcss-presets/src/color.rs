//! Theme color lookup and rendering.
//!
//! Copyright (c) 2025 Posit, PBC

use atomcss_engine::{Declarations, Theme, ThemeScope};
use atomcss_syntax::camel_case;

/// Look up a color utility body such as `red-500`, `primary` or `red-500/50`.
///
/// Returns the color value and the opacity suffix, if any. A bare palette name
/// resolves to its 400 shade.
pub fn resolve_color<'a>(theme: &'a Theme, body: &'a str) -> Option<(&'a str, Option<&'a str>)> {
    let (name, opacity) = match body.split_once('/') {
        Some((name, opacity)) => (name, Some(opacity)),
        None => (body, None),
    };
    let value = theme
        .get(ThemeScope::Colors, name)
        .or_else(|| theme.get(ThemeScope::Colors, &camel_case(name)))
        .or_else(|| theme.get(ThemeScope::Colors, &format!("{}-400", name)))?;
    Some((value, opacity))
}

/// Parse `#rgb` or `#rrggbb`.
pub fn hex_to_rgb(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#')?;
    let expand = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut chars = hex.chars().map(|c| format!("{c}{c}"));
            let r = expand(&chars.next()?)?;
            let g = expand(&chars.next()?)?;
            let b = expand(&chars.next()?)?;
            Some((r, g, b))
        }
        6 => Some((
            expand(hex.get(0..2)?)?,
            expand(hex.get(2..4)?)?,
            expand(hex.get(4..6)?)?,
        )),
        _ => None,
    }
}

/// Declarations setting `property` to a theme color.
///
/// Hex colors go through an opacity variable (`--un-<var>-opacity`) so that
/// opacity utilities can adjust them.
pub fn color_declarations(
    property: &str,
    opacity_var: &str,
    value: &str,
    opacity: Option<&str>,
) -> Option<Declarations> {
    let alpha = match opacity {
        Some(o) => Some(opacity_value(o)?),
        None => None,
    };
    let Some((r, g, b)) = hex_to_rgb(value) else {
        return Some(vec![(property.to_string(), value.to_string())]);
    };
    Some(match alpha {
        Some(alpha) => vec![(property.to_string(), format!("rgb({} {} {} / {})", r, g, b, alpha))],
        None => {
            let var = format!("--un-{}-opacity", opacity_var);
            vec![
                (var.clone(), "1".to_string()),
                (
                    property.to_string(),
                    format!("rgb({} {} {} / var({}))", r, g, b, var),
                ),
            ]
        }
    })
}

/// `50` -> `0.5`, `[.35]` -> `.35`.
pub fn opacity_value(raw: &str) -> Option<String> {
    if let Some(arbitrary) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        return Some(arbitrary.to_string());
    }
    let n: f64 = raw.parse().ok()?;
    if !(0.0..=100.0).contains(&n) {
        return None;
    }
    Some(format_number(n / 100.0))
}

/// Shortest decimal form (`1`, `0.5`).
pub fn format_number(n: f64) -> String {
    format!("{}", n)
}
