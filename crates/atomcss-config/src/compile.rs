//! The configuration walk.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! A single pre-order pass over the top level of the document. At-rules and
//! rules are consumed whole and never descended into, so declarations inside
//! unrelated at-rules (`@media`, `@supports`, ...) are never read as theme or
//! shortcut declarations.

use atomcss_syntax::{AtRule, Node, StyleSheet, Visit, parse, walk_children};
use tracing::{debug, trace};

use crate::configuration::Configuration;
use crate::directives;
use crate::error::{ConfigError, Result};
use crate::rules;
use crate::theme::ThemeCompiler;

/// Parse and compile a configuration document.
pub fn compile(source: &str) -> Result<Configuration> {
    let sheet = parse(source)?;
    compile_stylesheet(&sheet)
}

/// Compile an already parsed tree, which must be a stylesheet.
pub fn compile_node(node: &Node) -> Result<Configuration> {
    match node {
        Node::StyleSheet(sheet) => compile_stylesheet(sheet),
        other => Err(ConfigError::InvalidDocument(other.kind_name())),
    }
}

pub fn compile_stylesheet(sheet: &StyleSheet) -> Result<Configuration> {
    let mut compiler = Compiler::default();
    walk_children(&sheet.children, &mut |node| compiler.visit(node));
    compiler.finish()
}

#[derive(Default)]
struct Compiler {
    config: Configuration,
    error: Option<ConfigError>,
}

impl Compiler {
    fn visit(&mut self, node: &Node) -> Visit {
        if self.error.is_some() {
            return Visit::Skip;
        }
        match node {
            Node::AtRule(at_rule) => {
                if let Err(e) = self.at_rule(at_rule) {
                    self.error = Some(e);
                }
            }
            Node::Rule(rule) => rules::rule(&mut self.config, rule),
            _ => {}
        }
        Visit::Skip
    }

    fn at_rule(&mut self, at_rule: &AtRule) -> Result<()> {
        match at_rule.name.as_str() {
            "import" => directives::import(&mut self.config, at_rule)?,
            "theme" => {
                if let Some(block) = &at_rule.block {
                    ThemeCompiler {
                        theme: &mut self.config.theme,
                        web_fonts: &mut self.config.web_fonts,
                    }
                    .block(block);
                }
            }
            "keyframes" => directives::keyframes(&mut self.config, at_rule),
            other => trace!(at_rule = %other, "skipping at-rule"),
        }
        Ok(())
    }

    fn finish(self) -> Result<Configuration> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let config = self.config;
        debug!(
            presets = config.presets.len(),
            shortcuts = config.shortcuts.len(),
            preflights = config.preflights.len(),
            reset = config.reset.is_some(),
            "configuration compiled"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atomcss_engine::ThemeScope;
    use atomcss_syntax::{Block, Declaration, Value};

    #[test]
    fn test_root_must_be_stylesheet() {
        let node = Node::Declaration(Declaration {
            property: "color".into(),
            value: Value::default(),
            important: false,
        });
        let err = compile_node(&node).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration document: expected StyleSheet, found Declaration"
        );
        let err = compile_node(&Node::AtRule(AtRule {
            name: "media".into(),
            prelude: None,
            block: Some(Block::default()),
        }))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDocument("Atrule")));
    }

    #[test]
    fn test_parse_errors_surface() {
        assert!(matches!(compile(".a { color: red } }"), Err(ConfigError::Parse(_))));
        assert!(matches!(compile("@theme { --color-a: red }\n.dangling"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unrelated_at_rules_skipped() {
        let config = compile(
            "@media print { .x { --uno: flex } @theme { --color-a: red } } @supports (display: grid) { :theme { --color-b: blue } }",
        )
        .unwrap();
        assert!(config.shortcuts.is_empty());
        assert!(config.preflights.is_empty());
        assert!(config.theme.is_empty());
    }

    #[test]
    fn test_first_error_aborts() {
        let err = compile(r#"@import "reset/nope"; @import "preset-web-fonts/nope";"#).unwrap_err();
        assert_eq!(err.to_string(), "invalid reset selector: nope");
    }

    #[test]
    fn test_theme_at_rule() {
        let config = compile("@theme { --color-primary: #232323 }").unwrap();
        assert_eq!(
            config.theme.get(ThemeScope::Colors, "primary"),
            Some("#232323")
        );
    }
}
