//! Utility rules.
//!
//! Copyright (c) 2025 Posit, PBC

use std::fmt;
use std::sync::Arc;

use regex::{Captures, Regex};

use crate::theme::Theme;

/// Ordered `property: value` pairs.
pub type Declarations = Vec<(String, String)>;

/// What a rule produces for one utility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutput {
    /// Declarations applied to the utility's own selector
    pub declarations: Declarations,
    /// Extra rules whose selector is a template; `$$` stands for the utility selector
    pub nested: Vec<(String, Declarations)>,
    /// Top-level CSS emitted once per layer, such as `@keyframes`
    pub global: Vec<String>,
}

impl RuleOutput {
    pub fn new(declarations: Declarations) -> Self {
        Self {
            declarations,
            ..Default::default()
        }
    }

    /// Build from borrowed pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(p, v)| (p.to_string(), v.to_string()))
                .collect(),
        )
    }

    pub fn with_nested(mut self, template: impl Into<String>, declarations: Declarations) -> Self {
        self.nested.push((template.into(), declarations));
        self
    }

    pub fn with_global(mut self, css: impl Into<String>) -> Self {
        self.global.push(css.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty() && self.nested.is_empty() && self.global.is_empty()
    }
}

type Handler = Arc<dyn Fn(&Captures<'_>, &Theme) -> Option<RuleOutput> + Send + Sync>;

#[derive(Clone)]
enum Matcher {
    Static { name: String, output: RuleOutput },
    Dynamic { pattern: Regex, handler: Handler },
}

/// Maps utility names to CSS.
///
/// A static rule matches exactly one name. A dynamic rule matches a regular
/// expression (anchored at both ends) and computes its output from the
/// captures and the theme; returning `None` lets an earlier rule try.
#[derive(Clone)]
pub struct Rule {
    matcher: Matcher,
    layer: Option<String>,
}

impl Rule {
    pub fn fixed(name: impl Into<String>, declarations: &[(&str, &str)]) -> Self {
        Self::fixed_output(name, RuleOutput::from_pairs(declarations))
    }

    pub fn fixed_output(name: impl Into<String>, output: RuleOutput) -> Self {
        Self {
            matcher: Matcher::Static {
                name: name.into(),
                output,
            },
            layer: None,
        }
    }

    /// Create a dynamic rule.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regular expression. Patterns are
    /// expected to be constants.
    pub fn dynamic<F>(pattern: &str, handler: F) -> Self
    where
        F: Fn(&Captures<'_>, &Theme) -> Option<RuleOutput> + Send + Sync + 'static,
    {
        let pattern = Regex::new(&format!("^(?:{})$", pattern)).unwrap();
        Self {
            matcher: Matcher::Dynamic {
                pattern,
                handler: Arc::new(handler),
            },
            layer: None,
        }
    }

    /// Place this rule's output in `layer` instead of the default layer.
    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = Some(layer.into());
        self
    }

    pub fn layer(&self) -> Option<&str> {
        self.layer.as_deref()
    }

    pub fn matches(&self, utility: &str, theme: &Theme) -> Option<RuleOutput> {
        match &self.matcher {
            Matcher::Static { name, output } => (name == utility).then(|| output.clone()),
            Matcher::Dynamic { pattern, handler } => {
                let captures = pattern.captures(utility)?;
                handler(&captures, theme).filter(|output| !output.is_empty())
            }
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Rule");
        match &self.matcher {
            Matcher::Static { name, .. } => s.field("name", name),
            Matcher::Dynamic { pattern, .. } => s.field("pattern", &pattern.as_str()),
        };
        s.field("layer", &self.layer).finish()
    }
}
