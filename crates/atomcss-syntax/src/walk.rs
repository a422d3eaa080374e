//! Depth-first tree traversal.
//!
//! Copyright (c) 2025 Posit, PBC

use crate::ast::Node;

/// What the walker should do after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Descend into the node's children.
    Continue,
    /// Do not descend into this node's children; siblings are still visited.
    Skip,
}

/// Visit `node` and its descendants in pre-order.
///
/// # Example
///
/// ```
/// use atomcss_syntax::{Node, Visit, parse, walk};
///
/// let sheet = parse("@media print { a { color: red } } b { color: blue }").unwrap();
/// let mut rules = 0;
/// walk(&Node::StyleSheet(sheet), &mut |node| match node {
///     Node::AtRule(_) => Visit::Skip,
///     Node::Rule(_) => {
///         rules += 1;
///         Visit::Continue
///     }
///     _ => Visit::Continue,
/// });
/// assert_eq!(rules, 1);
/// ```
pub fn walk<F>(node: &Node, visitor: &mut F)
where
    F: FnMut(&Node) -> Visit,
{
    if visitor(node) == Visit::Continue {
        walk_children(node.children(), visitor);
    }
}

/// Walk each node of a child list in order.
pub fn walk_children<F>(children: &[Node], visitor: &mut F)
where
    F: FnMut(&Node) -> Visit,
{
    for child in children {
        walk(child, visitor);
    }
}
