//! CSS syntax layer for atomcss configuration documents.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! This crate provides:
//! - A parser producing a small CSS tree (stylesheets, rules, at-rules,
//!   declarations) from `cssparser` tokens
//! - A compact serializer used to reproduce blocks verbatim
//! - A depth-first walker whose visitor decides whether to descend

mod ast;
mod error;
mod generate;
mod parser;
mod walk;

pub use ast::{
    AtRule, Block, Declaration, Node, Prelude, PreludeToken, Rule, SelectorList, StyleSheet,
    Value, ValueItem, ValueKind,
};
pub use error::ParseError;
pub use generate::{generate, generate_block};
pub use parser::parse;
pub use walk::{Visit, walk, walk_children};

/// Convert a kebab-case identifier to camelCase (`font-family` → `fontFamily`).
///
/// Only a dash followed by an ASCII lowercase letter is folded, so numeric
/// segments such as `2xl` keep their dash.
pub fn camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '-'
            && let Some(next) = chars.peek().copied()
            && next.is_ascii_lowercase()
        {
            out.push(next.to_ascii_uppercase());
            chars.next();
            continue;
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("font-family"), "fontFamily");
        assert_eq!(camel_case("primary"), "primary");
        assert_eq!(camel_case("brand-primary-dark"), "brandPrimaryDark");
        assert_eq!(camel_case("size-2xl"), "size-2xl");
    }
}
