//! Class selector escaping.
//!
//! Copyright (c) 2025 Posit, PBC

/// Escape a token so it can be used as a class selector (`.` not included).
///
/// ```
/// use atomcss_engine::escape_selector;
///
/// assert_eq!(escape_selector("hover:text-red-500"), "hover\\:text-red-500");
/// assert_eq!(escape_selector("w-1/2"), "w-1\\/2");
/// assert_eq!(escape_selector("2xl:flex"), "\\32 xl\\:flex");
/// ```
pub fn escape_selector(token: &str) -> String {
    let mut out = String::with_capacity(token.len() + 4);
    for (idx, ch) in token.chars().enumerate() {
        if idx == 0 && ch.is_ascii_digit() {
            out.push_str(&format!("\\3{} ", ch));
        } else if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii() {
            out.push(ch);
        } else {
            out.push('\\');
            out.push(ch);
        }
    }
    out
}
