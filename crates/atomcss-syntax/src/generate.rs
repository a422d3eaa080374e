//! Compact CSS serialization.
//!
//! Copyright (c) 2025 Posit, PBC

use crate::ast::{AtRule, Block, Declaration, Node, Rule};

/// Serialize a node to compact CSS text (`a{color:red;margin:0}`).
pub fn generate(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

/// Serialize a block including its braces.
pub fn generate_block(block: &Block) -> String {
    let mut out = String::new();
    write_block(&mut out, block);
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::StyleSheet(sheet) => write_children(out, &sheet.children),
        Node::Rule(rule) => write_rule(out, rule),
        Node::AtRule(at_rule) => write_at_rule(out, at_rule),
        Node::Declaration(decl) => write_declaration(out, decl),
        Node::Raw(raw) => out.push_str(raw),
    }
}

fn write_children(out: &mut String, children: &[Node]) {
    for (idx, child) in children.iter().enumerate() {
        write_node(out, child);
        let needs_separator = matches!(
            child,
            Node::Declaration(_) | Node::Raw(_) | Node::AtRule(AtRule { block: None, .. })
        );
        if needs_separator && idx + 1 < children.len() {
            out.push(';');
        }
    }
}

fn write_block(out: &mut String, block: &Block) {
    out.push('{');
    write_children(out, &block.children);
    out.push('}');
}

fn write_rule(out: &mut String, rule: &Rule) {
    out.push_str(&rule.prelude.selectors.join(","));
    write_block(out, &rule.block);
}

fn write_at_rule(out: &mut String, at_rule: &AtRule) {
    out.push('@');
    out.push_str(&at_rule.name);
    if let Some(prelude) = &at_rule.prelude {
        out.push(' ');
        out.push_str(&prelude.text);
    }
    match &at_rule.block {
        Some(block) => write_block(out, block),
        None => out.push(';'),
    }
}

fn write_declaration(out: &mut String, decl: &Declaration) {
    out.push_str(&decl.property);
    out.push(':');
    out.push_str(decl.value.text());
    if decl.important {
        out.push_str("!important");
    }
}
