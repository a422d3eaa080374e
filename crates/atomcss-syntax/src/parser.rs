//! Stylesheet parsing on top of `cssparser`.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! `cssparser` supplies tokens and block nesting; this module folds them into
//! the tree in [`crate::ast`]. Block contents are parsed uniformly: inside any
//! `{ ... }` a statement is a nested rule when a `{` comes before the next
//! `;`, and a declaration otherwise. Unclosed blocks end with the input.

use cssparser::{Delimiter, Parser, ParserInput, ToCss, Token};

use crate::ast::{
    AtRule, Block, Declaration, Node, Prelude, PreludeToken, Rule, SelectorList, StyleSheet,
    Value, ValueItem, ValueKind,
};
use crate::error::ParseError;

type CssError<'i> = cssparser::ParseError<'i, &'static str>;

/// Parse a CSS document into a [`StyleSheet`].
///
/// # Example
///
/// ```
/// use atomcss_syntax::{Node, parse};
///
/// let sheet = parse(r#"@import "preset-uno"; .btn { color: red; }"#).unwrap();
/// assert_eq!(sheet.children.len(), 2);
/// assert!(matches!(sheet.children[1], Node::Rule(_)));
/// ```
pub fn parse(source: &str) -> Result<StyleSheet, ParseError> {
    let mut input = ParserInput::new(source);
    let mut parser = Parser::new(&mut input);
    stylesheet(&mut parser).map_err(ParseError::from_css)
}

fn stylesheet<'i>(input: &mut Parser<'i, '_>) -> Result<StyleSheet, CssError<'i>> {
    let mut children = Vec::new();
    loop {
        let state = input.state();
        let token = match input.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::WhiteSpace(_) | Token::Comment(_) | Token::Semicolon | Token::CDO | Token::CDC => {}
            Token::AtKeyword(name) => {
                children.push(Node::AtRule(at_rule(name.to_string(), input)?));
            }
            Token::CloseCurlyBracket | Token::CloseParenthesis | Token::CloseSquareBracket => {
                return Err(input.new_unexpected_token_error(token));
            }
            _ => {
                input.reset(&state);
                children.push(Node::Rule(rule(input)?));
            }
        }
    }
    Ok(StyleSheet { children })
}

fn block<'i>(input: &mut Parser<'i, '_>) -> Result<Block, CssError<'i>> {
    let mut children = Vec::new();
    loop {
        let state = input.state();
        let token = match input.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::WhiteSpace(_) | Token::Comment(_) | Token::Semicolon => {}
            Token::AtKeyword(name) => {
                children.push(Node::AtRule(at_rule(name.to_string(), input)?));
            }
            _ => {
                input.reset(&state);
                if starts_nested_rule(input) {
                    children.push(Node::Rule(rule(input)?));
                } else {
                    children.push(declaration(input)?);
                }
            }
        }
    }
    Ok(Block { children })
}

/// Whether a `{` comes before the next `;` or the end of the block.
fn starts_nested_rule(input: &mut Parser<'_, '_>) -> bool {
    let state = input.state();
    let nested = loop {
        match input.next_including_whitespace_and_comments() {
            Ok(Token::CurlyBracketBlock) => break true,
            Ok(Token::Semicolon) | Err(_) => break false,
            Ok(_) => {}
        }
    };
    input.reset(&state);
    nested
}

fn at_rule<'i>(name: String, input: &mut Parser<'i, '_>) -> Result<AtRule, CssError<'i>> {
    let prelude = input.parse_until_before(
        Delimiter::Semicolon | Delimiter::CurlyBracketBlock,
        |input| components(input),
    )?;
    // Consumes the `;` too; the end of input or of the enclosing block also
    // terminates the statement
    let has_block = matches!(
        input.next_including_whitespace_and_comments(),
        Ok(Token::CurlyBracketBlock)
    );
    let block = if has_block {
        Some(input.parse_nested_block(|input| block(input))?)
    } else {
        None
    };
    Ok(AtRule {
        name,
        prelude: build_prelude(&prelude),
        block,
    })
}

fn rule<'i>(input: &mut Parser<'i, '_>) -> Result<Rule, CssError<'i>> {
    let prelude = input.parse_until_before(Delimiter::CurlyBracketBlock, |input| {
        components(input)
    })?;
    if !matches!(
        input.next_including_whitespace_and_comments(),
        Ok(Token::CurlyBracketBlock)
    ) {
        return Err(input.new_custom_error("expected '{' after selector"));
    }
    let prelude = build_selector_list(&prelude);
    if prelude.is_empty() {
        return Err(input.new_custom_error("empty selector"));
    }
    let block = input.parse_nested_block(|input| block(input))?;
    Ok(Rule { prelude, block })
}

fn declaration<'i>(input: &mut Parser<'i, '_>) -> Result<Node, CssError<'i>> {
    let statement = input.parse_until_after(Delimiter::Semicolon, |input| components(input))?;

    let mut significant = statement
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace());
    let property = match (significant.next(), significant.next()) {
        (
            Some((_, Component {
                kind: ComponentKind::Ident(property),
                ..
            })),
            Some((colon, Component {
                kind: ComponentKind::Colon,
                ..
            })),
        ) => Some((property.clone(), colon)),
        _ => None,
    };
    // Keep unreadable content instead of failing the whole document
    let Some((property, colon)) = property else {
        return Ok(Node::Raw(text(&statement)));
    };

    let (value, important) = strip_important(&statement[colon + 1..]);
    Ok(Node::Declaration(Declaration {
        property,
        value: build_value(value),
        important,
    }))
}

/// A top-level component value: one token, or a whole function or block.
#[derive(Debug, Clone)]
struct Component {
    kind: ComponentKind,
    /// Serialized form; nested blocks are included whole
    css: String,
}

#[derive(Debug, Clone)]
enum ComponentKind {
    Whitespace,
    Comma,
    Colon,
    Bang,
    String(String),
    Ident(String),
    Function { name: String, args: Vec<String> },
    Other,
}

impl Component {
    fn new(kind: ComponentKind, css: impl Into<String>) -> Self {
        Self {
            kind,
            css: css.into(),
        }
    }

    fn is_whitespace(&self) -> bool {
        matches!(self.kind, ComponentKind::Whitespace)
    }
}

/// Read every remaining component of `input`. Comments are dropped.
fn components<'i>(input: &mut Parser<'i, '_>) -> Result<Vec<Component>, CssError<'i>> {
    let mut out = Vec::new();
    loop {
        let token = match input.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        let component = match &token {
            Token::WhiteSpace(_) => Component::new(ComponentKind::Whitespace, " "),
            Token::Comment(_) => continue,
            Token::Comma => Component::new(ComponentKind::Comma, ","),
            Token::Colon => Component::new(ComponentKind::Colon, ":"),
            Token::Delim('!') => Component::new(ComponentKind::Bang, "!"),
            Token::QuotedString(s) => {
                Component::new(ComponentKind::String(s.to_string()), token.to_css_string())
            }
            Token::Ident(s) => {
                Component::new(ComponentKind::Ident(s.to_string()), token.to_css_string())
            }
            Token::UnquotedUrl(url) => Component::new(
                ComponentKind::Function {
                    name: "url".to_string(),
                    args: vec![url.to_string()],
                },
                token.to_css_string(),
            ),
            Token::Function(name) => {
                let name = name.to_string();
                let inner = input.parse_nested_block(|input| components(input))?;
                Component::new(
                    ComponentKind::Function {
                        args: arguments(&inner),
                        name: name.clone(),
                    },
                    format!("{}({})", name, text(&inner)),
                )
            }
            Token::ParenthesisBlock => nested(input, '(', ')')?,
            Token::SquareBracketBlock => nested(input, '[', ']')?,
            Token::CurlyBracketBlock => nested(input, '{', '}')?,
            Token::BadString(_) => return Err(input.new_custom_error("unterminated string")),
            Token::BadUrl(_) => return Err(input.new_custom_error("invalid url")),
            _ => Component::new(ComponentKind::Other, token.to_css_string()),
        };
        out.push(component);
    }
    Ok(out)
}

fn nested<'i>(
    input: &mut Parser<'i, '_>,
    open: char,
    close: char,
) -> Result<Component, CssError<'i>> {
    let inner = input.parse_nested_block(|input| components(input))?;
    Ok(Component::new(
        ComponentKind::Other,
        format!("{}{}{}", open, text(&inner), close),
    ))
}

/// Join component texts, collapsing whitespace and trimming the ends.
fn text(components: &[Component]) -> String {
    let mut out = String::new();
    for component in components {
        if component.is_whitespace() {
            if !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
        } else {
            out.push_str(&component.css);
        }
    }
    out.truncate(out.trim_end().len());
    out
}

fn split_commas(components: &[Component]) -> impl Iterator<Item = &[Component]> {
    components.split(|c| matches!(c.kind, ComponentKind::Comma))
}

fn significant(components: &[Component]) -> Vec<&Component> {
    components.iter().filter(|c| !c.is_whitespace()).collect()
}

fn arguments(components: &[Component]) -> Vec<String> {
    split_commas(components)
        .filter_map(|group| match significant(group).as_slice() {
            [] => None,
            [
                Component {
                    kind: ComponentKind::String(s),
                    ..
                },
            ] => Some(s.clone()),
            _ => Some(text(group)),
        })
        .collect()
}

fn build_selector_list(components: &[Component]) -> SelectorList {
    let selectors = split_commas(components)
        .map(text)
        .filter(|s| !s.is_empty())
        .collect();
    SelectorList { selectors }
}

fn build_prelude(components: &[Component]) -> Option<Prelude> {
    let text = text(components);
    if text.is_empty() {
        return None;
    }
    let tokens = significant(components)
        .into_iter()
        .map(|component| match &component.kind {
            ComponentKind::String(s) => PreludeToken::String(s.clone()),
            ComponentKind::Ident(s) => PreludeToken::Identifier(s.clone()),
            ComponentKind::Function { name, args } => PreludeToken::Function {
                name: name.clone(),
                args: args.clone(),
            },
            _ => PreludeToken::Other(component.css.clone()),
        })
        .collect();
    Some(Prelude { tokens, text })
}

fn build_value(components: &[Component]) -> Value {
    let items = split_commas(components)
        .filter_map(|group| {
            let text = text(group);
            if text.is_empty() {
                return None;
            }
            let kind = match significant(group).as_slice() {
                [only] => match &only.kind {
                    ComponentKind::String(s) => ValueKind::String(s.clone()),
                    ComponentKind::Ident(s) => ValueKind::Identifier(s.clone()),
                    ComponentKind::Function { name, args } => ValueKind::Function {
                        name: name.clone(),
                        args: args.clone(),
                    },
                    _ => ValueKind::Other,
                },
                _ => ValueKind::Other,
            };
            Some(ValueItem { kind, text })
        })
        .collect();
    Value {
        raw: text(components),
        items,
    }
}

/// Split off a trailing `!important`, reporting whether it was present.
fn strip_important(value: &[Component]) -> (&[Component], bool) {
    let is_important = match significant(value).as_slice() {
        [
            ..,
            Component {
                kind: ComponentKind::Bang,
                ..
            },
            Component {
                kind: ComponentKind::Ident(word),
                ..
            },
        ] => word.eq_ignore_ascii_case("important"),
        _ => false,
    };
    let bang = value
        .iter()
        .rposition(|c| matches!(c.kind, ComponentKind::Bang));
    match bang {
        Some(bang) if is_important => (&value[..bang], true),
        _ => (value, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn first_rule(source: &str) -> Rule {
        match parse(source).unwrap().children.into_iter().next() {
            Some(Node::Rule(rule)) => rule,
            other => panic!("expected rule, got {:?}", other),
        }
    }

    fn first_declaration(source: &str) -> Declaration {
        first_rule(source).block.declarations().next().unwrap().clone()
    }

    #[test]
    fn test_parse_import() {
        let sheet = parse(r#"@import "preset-wind";"#).unwrap();
        let Node::AtRule(at_rule) = &sheet.children[0] else {
            panic!("expected at-rule");
        };
        assert_eq!(at_rule.name, "import");
        assert!(at_rule.block.is_none());
        assert_eq!(
            at_rule.prelude.as_ref().and_then(|p| p.first()),
            Some(&PreludeToken::String("preset-wind".to_string()))
        );
    }

    #[test]
    fn test_parse_import_url() {
        let sheet = parse(r#"@import url(preset-wind); @import url("reset");"#).unwrap();
        let firsts: Vec<_> = sheet
            .children
            .iter()
            .filter_map(|node| match node {
                Node::AtRule(at_rule) => at_rule.prelude.as_ref()?.first().cloned(),
                _ => None,
            })
            .collect();
        assert_eq!(
            firsts,
            vec![
                PreludeToken::Function {
                    name: "url".to_string(),
                    args: vec!["preset-wind".to_string()],
                },
                PreludeToken::Function {
                    name: "url".to_string(),
                    args: vec!["reset".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_parse_theme_block_declarations() {
        let sheet = parse("@theme { --color-primary: #232323; --breakpoint-sm: 640px }").unwrap();
        let Node::AtRule(at_rule) = &sheet.children[0] else {
            panic!("expected at-rule");
        };
        let block = at_rule.block.as_ref().unwrap();
        let decls: Vec<_> = block.declarations().collect();
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].property, "--color-primary");
        assert_eq!(decls[0].value.text(), "#232323");
        assert_eq!(decls[1].value.text(), "640px");
    }

    #[test]
    fn test_parse_selector_list() {
        let rule = first_rule("h1,  h2 > a:hover ,.x { margin: 0 }");
        assert_eq!(rule.prelude.selectors, vec!["h1", "h2 > a:hover", ".x"]);
    }

    #[test]
    fn test_parse_nested_apply_and_nested_rule() {
        let rule = first_rule(".btn { @apply px-4 py-2; &:hover { color: red; } color: blue; }");
        assert_eq!(rule.block.children.len(), 3);
        let Node::AtRule(apply) = &rule.block.children[0] else {
            panic!("expected @apply");
        };
        assert_eq!(apply.name, "apply");
        assert_eq!(apply.prelude.as_ref().unwrap().text, "px-4 py-2");
        assert!(matches!(rule.block.children[1], Node::Rule(_)));
        assert!(matches!(rule.block.children[2], Node::Declaration(_)));
    }

    #[test]
    fn test_parse_custom_property_with_utilities() {
        let decl = first_declaration(".custom { --uno: hover:text-lg w-1/2 !p-4; }");
        assert_eq!(decl.property, "--uno");
        assert_eq!(decl.value.text(), "hover:text-lg w-1/2 !p-4");
        assert!(!decl.important);
    }

    #[test]
    fn test_parse_value_items() {
        let decl = first_declaration(
            r#"a { font-family: webfont("Inter", 400, 700), "Helvetica", sans-serif; }"#,
        );
        let kinds: Vec<_> = decl.value.items.iter().map(|item| item.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                ValueKind::Function {
                    name: "webfont".to_string(),
                    args: vec!["Inter".to_string(), "400".to_string(), "700".to_string()],
                },
                ValueKind::String("Helvetica".to_string()),
                ValueKind::Identifier("sans-serif".to_string()),
            ]
        );
    }

    #[test]
    fn test_value_items_keep_source_text() {
        let decl = first_declaration(r#"a { src: local("Fira Sans"), url(x.woff2) format("woff2") }"#);
        let texts: Vec<_> = decl.value.items.iter().map(ValueItem::to_css).collect();
        assert_eq!(texts, vec![r#"local("Fira Sans")"#, r#"url(x.woff2) format("woff2")"#]);
        assert_eq!(decl.value.items[1].kind, ValueKind::Other);
    }

    #[test]
    fn test_parse_important() {
        let decl = first_declaration("a { color: red !important; }");
        assert!(decl.important);
        assert_eq!(decl.value.text(), "red");
    }

    #[test]
    fn test_comments_dropped() {
        let decl = first_declaration("a { /* lead */ margin: 0 /* mid */ auto; }");
        assert_eq!(decl.property, "margin");
        assert_eq!(decl.value.text(), "0 auto");
    }

    #[test]
    fn test_parse_keyframes() {
        let sheet = parse("@keyframes spin { from { transform: rotate(0deg) } to { transform: rotate(360deg) } }")
            .unwrap();
        let Node::AtRule(at_rule) = &sheet.children[0] else {
            panic!("expected at-rule");
        };
        assert_eq!(
            at_rule.prelude.as_ref().unwrap().first(),
            Some(&PreludeToken::Identifier("spin".to_string()))
        );
        let block = at_rule.block.as_ref().unwrap();
        assert_eq!(block.children.len(), 2);
    }

    #[test]
    fn test_unreadable_statement_kept_raw() {
        let rule = first_rule("a { nonsense; color: red }");
        assert_eq!(rule.block.children[0], Node::Raw("nonsense".to_string()));
        assert!(matches!(rule.block.children[1], Node::Declaration(_)));
    }

    #[test]
    fn test_unclosed_block_ends_with_input() {
        let rule = first_rule(".a { color: red;");
        assert_eq!(rule.block.declarations().count(), 1);
    }

    #[test]
    fn test_stray_closing_brace_is_error() {
        let err = parse("a { color: red } }").unwrap_err();
        assert_eq!(err.message, "unexpected '}'");
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_selector_without_block_is_error() {
        let err = parse("a { color: red }\n.b").unwrap_err();
        assert_eq!(err.message, "expected '{' after selector");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_unterminated_string_is_error() {
        let err = parse("a { content: \"oops\n }").unwrap_err();
        assert_eq!(err.message, "unterminated string");
    }
}
