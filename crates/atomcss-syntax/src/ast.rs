//! CSS tree types.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! The tree is deliberately shallow: selectors and values keep their source
//! text (whitespace-normalized) next to a light structural reading, which is
//! all the configuration compiler needs.

/// Any node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    StyleSheet(StyleSheet),
    Rule(Rule),
    AtRule(AtRule),
    Declaration(Declaration),
    /// Content the parser kept but did not interpret.
    Raw(String),
}

impl Node {
    /// Direct children of this node, if it has a body.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::StyleSheet(sheet) => &sheet.children,
            Node::Rule(rule) => &rule.block.children,
            Node::AtRule(at_rule) => at_rule
                .block
                .as_ref()
                .map_or(&[], |b| b.children.as_slice()),
            Node::Declaration(_) | Node::Raw(_) => &[],
        }
    }

    /// Short name of the node kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::StyleSheet(_) => "StyleSheet",
            Node::Rule(_) => "Rule",
            Node::AtRule(_) => "Atrule",
            Node::Declaration(_) => "Declaration",
            Node::Raw(_) => "Raw",
        }
    }
}

/// The root of a parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    pub children: Vec<Node>,
}

/// A qualified rule: `selector, selector { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub prelude: SelectorList,
    pub block: Block,
}

/// Comma-separated selectors, each as normalized source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<String>,
}

impl SelectorList {
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// The only selector of the list, if there is exactly one.
    pub fn single(&self) -> Option<&str> {
        match self.selectors.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }
}

/// An at-rule: `@name prelude;` or `@name prelude { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    pub name: String,
    pub prelude: Option<Prelude>,
    pub block: Option<Block>,
}

/// The tokens between an at-rule name and its block or semicolon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prelude {
    pub tokens: Vec<PreludeToken>,
    /// Normalized source text of the whole prelude.
    pub text: String,
}

impl Prelude {
    /// The first significant token, as css-tree's `children.first`.
    pub fn first(&self) -> Option<&PreludeToken> {
        self.tokens.first()
    }
}

/// A significant (non-whitespace) prelude component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreludeToken {
    String(String),
    Identifier(String),
    Function { name: String, args: Vec<String> },
    Other(String),
}

/// The `{ ... }` body of a rule or at-rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub children: Vec<Node>,
}

impl Block {
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.children.iter().filter_map(|child| match child {
            Node::Declaration(decl) => Some(decl),
            _ => None,
        })
    }
}

/// `property: value [!important]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: Value,
    pub important: bool,
}

impl Declaration {
    pub fn is_custom_property(&self) -> bool {
        self.property.starts_with("--")
    }
}

/// A declaration value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Value {
    /// Normalized source text (trimmed, whitespace runs collapsed).
    pub raw: String,
    /// Top-level comma-separated items.
    pub items: Vec<ValueItem>,
}

impl Value {
    pub fn text(&self) -> &str {
        self.raw.trim()
    }
}

/// One comma-separated item of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueItem {
    pub kind: ValueKind,
    /// Source text of the item, whitespace collapsed.
    pub text: String,
}

impl ValueItem {
    pub fn to_css(&self) -> &str {
        &self.text
    }
}

/// How a value item reads when it is a single component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// A lone quoted string, unquoted.
    String(String),
    /// A lone identifier.
    Identifier(String),
    /// A lone function call; string arguments are unquoted.
    Function { name: String, args: Vec<String> },
    /// Anything else.
    Other,
}
