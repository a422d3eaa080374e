/*
 * config_document_test.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Parses a complete configuration document and checks the tree shape the
 * configuration compiler relies on.
 */

use atomcss_syntax::{Node, PreludeToken, Visit, generate_block, parse, walk};

const DOCUMENT: &str = r#"
@import "preset-uno";
@import "@unocss/preset-web-fonts/bunny";

@theme {
  --color-primary: #232323;
  --font-family-sans: "Inter", sans-serif;
  --animation-duration-spin: 1s;
}

/* keyframes are stored verbatim */
@keyframes spin {
  from { transform: rotate(0deg); }
  to { transform: rotate(360deg); }
}

.custom {
  @apply text-primary font-bold;
  --uno: text-lg font-serif;
  font-family: var(--font-family-serif);
}

body > p, a:hover { color: red; }
"#;

#[test]
fn test_top_level_nodes() {
    let sheet = parse(DOCUMENT).unwrap();
    let kinds: Vec<_> = sheet.children.iter().map(Node::kind_name).collect();
    assert_eq!(
        kinds,
        vec!["Atrule", "Atrule", "Atrule", "Atrule", "Rule", "Rule"]
    );
}

#[test]
fn test_import_prelude_strings() {
    let sheet = parse(DOCUMENT).unwrap();
    let imports: Vec<_> = sheet
        .children
        .iter()
        .filter_map(|node| match node {
            Node::AtRule(at_rule) if at_rule.name == "import" => at_rule.prelude.as_ref(),
            _ => None,
        })
        .filter_map(|prelude| match prelude.first() {
            Some(PreludeToken::String(s)) => Some(s.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(imports, vec!["preset-uno", "@unocss/preset-web-fonts/bunny"]);
}

#[test]
fn test_keyframes_reproduced_verbatim() {
    let sheet = parse(DOCUMENT).unwrap();
    let Node::AtRule(keyframes) = &sheet.children[3] else {
        panic!("expected keyframes");
    };
    assert_eq!(
        generate_block(keyframes.block.as_ref().unwrap()),
        "{from{transform:rotate(0deg)}to{transform:rotate(360deg)}}"
    );
}

#[test]
fn test_walk_skipping_at_rules_only_sees_rule_contents() {
    let sheet = parse(DOCUMENT).unwrap();
    let mut declarations = Vec::new();
    walk(&Node::StyleSheet(sheet), &mut |node| match node {
        Node::AtRule(_) => Visit::Skip,
        Node::Declaration(decl) => {
            declarations.push(decl.property.clone());
            Visit::Continue
        }
        _ => Visit::Continue,
    });
    assert_eq!(declarations, vec!["--uno", "font-family", "color"]);
}
