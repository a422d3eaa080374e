//! Token resolution and layered CSS output.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! A token is resolved in three steps:
//! 1. Variant prefixes are stripped (`md:hover:text-lg` -> `text-lg`), each
//!    contributing a [`VariantApply`].
//! 2. If what remains names a shortcut, its body is resolved recursively and
//!    all resulting declarations are merged under the token's selector.
//! 3. Otherwise the rules are tried from last registered to first.
//!
//! Output is grouped into layers; see [`layer_order`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use crate::config::{GenerateOptions, GenerateResult, Preflight, UserConfig};
use crate::error::EngineError;
use crate::escape::escape_selector;
use crate::extractor::{Extractor, SplitExtractor};
use crate::preset::Preset;
use crate::rule::{Declarations, Rule, RuleOutput};
use crate::theme::Theme;
use crate::variant::{Variant, VariantApply};
use crate::{LAYER_DEFAULT, LAYER_IMPORTS, LAYER_PREFLIGHTS, LAYER_SHORTCUTS};

const MAX_VARIANTS: usize = 10;
const MAX_SHORTCUT_DEPTH: usize = 8;

/// Sort weight of a layer; ties are broken by layer name.
pub fn layer_order(layer: &str) -> i32 {
    match layer {
        LAYER_IMPORTS => -200,
        LAYER_PREFLIGHTS => -100,
        LAYER_SHORTCUTS => -10,
        _ => 0,
    }
}

fn layer_sort_key(layer: &str) -> (i32, bool, String) {
    (layer_order(layer), layer != LAYER_DEFAULT, layer.to_string())
}

/// Resolved configuration ready to turn tokens into CSS.
pub struct Generator {
    presets: Vec<Arc<dyn Preset>>,
    theme: Theme,
    rules: Vec<Rule>,
    variants: Vec<Arc<dyn Variant>>,
    extractors: Vec<Arc<dyn Extractor>>,
    shortcuts: IndexMap<String, String>,
    preflights: Vec<Preflight>,
}

#[derive(Debug, Clone)]
struct Fragment {
    applies: Vec<VariantApply>,
    important: bool,
    output: RuleOutput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Origin {
    Shortcut,
    Rule(usize),
}

#[derive(Debug)]
struct Resolution {
    origin: Origin,
    layer: String,
    fragments: Vec<Fragment>,
}

#[derive(Debug, Default)]
struct LayerBuffer {
    preflights: Vec<String>,
    globals: IndexSet<String>,
    rules: Vec<((Origin, String), String)>,
}

impl LayerBuffer {
    fn is_empty(&self) -> bool {
        self.preflights.is_empty() && self.globals.is_empty() && self.rules.is_empty()
    }
}

impl Generator {
    pub fn new(config: UserConfig) -> Self {
        let UserConfig {
            presets,
            theme: user_theme,
            shortcuts: user_shortcuts,
            preflights: user_preflights,
        } = config;

        let mut theme = Theme::new();
        for preset in &presets {
            theme.merge(&preset.theme());
        }
        theme.merge(&user_theme);
        for preset in &presets {
            preset.extend_theme(&mut theme);
        }

        let mut rules = Vec::new();
        let mut variants: Vec<Arc<dyn Variant>> = Vec::new();
        let mut extractors: Vec<Arc<dyn Extractor>> = vec![Arc::new(SplitExtractor)];
        let mut shortcuts = IndexMap::new();
        let mut preflights = Vec::new();
        for preset in &presets {
            rules.extend(preset.rules());
            variants.extend(preset.variants());
            extractors.extend(preset.extractors());
            shortcuts.extend(preset.shortcuts());
            preflights.extend(preset.preflights());
        }
        shortcuts.extend(user_shortcuts);
        preflights.extend(user_preflights);

        debug!(
            presets = presets.len(),
            rules = rules.len(),
            variants = variants.len(),
            shortcuts = shortcuts.len(),
            "generator configured"
        );

        Self {
            presets,
            theme,
            rules,
            variants,
            extractors,
            shortcuts,
            preflights,
        }
    }

    /// The merged theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn shortcuts(&self) -> &IndexMap<String, String> {
        &self.shortcuts
    }

    pub fn presets(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.name())
    }

    /// Run every extractor over `content`, adding candidates to `tokens`.
    pub fn apply_extractors(&self, content: &str, tokens: &mut BTreeSet<String>) {
        for extractor in &self.extractors {
            extractor.extract(content, tokens);
        }
    }

    pub async fn generate(
        &self,
        tokens: &BTreeSet<String>,
        options: &GenerateOptions,
    ) -> Result<GenerateResult, EngineError> {
        for preset in &self.presets {
            preset
                .prepare(tokens)
                .await
                .map_err(|e| EngineError::preset(preset.name(), e))?;
        }

        let mut layers: BTreeMap<(i32, bool, String), LayerBuffer> = BTreeMap::new();

        if options.preflights {
            for preflight in &self.preflights {
                let css = preflight.render(&self.theme);
                let css = css.trim();
                if css.is_empty() {
                    continue;
                }
                layers
                    .entry(layer_sort_key(&preflight.layer))
                    .or_default()
                    .preflights
                    .push(css.to_string());
            }
        }

        let mut matched = BTreeSet::new();
        for token in tokens {
            let Some(resolution) = self.resolve(token, 0) else {
                trace!(token = %token, "no match");
                continue;
            };
            let buffer = layers.entry(layer_sort_key(&resolution.layer)).or_default();
            for css in render_token(token, &resolution.fragments, buffer) {
                buffer.rules.push(((resolution.origin, token.clone()), css));
            }
            matched.insert(token.clone());
        }

        let mut sections = Vec::new();
        let mut layer_names = Vec::new();
        for ((_, _, name), mut buffer) in layers {
            if buffer.is_empty() {
                continue;
            }
            buffer.rules.sort_by(|a, b| a.0.cmp(&b.0));
            let mut lines = Vec::new();
            if !options.minify {
                lines.push(format!("/* layer: {} */", name));
            }
            lines.extend(buffer.preflights);
            lines.extend(buffer.globals);
            lines.extend(buffer.rules.into_iter().map(|(_, css)| css));
            sections.push(lines.join(if options.minify { "" } else { "\n" }));
            layer_names.push(name);
        }

        let css = sections.join(if options.minify { "" } else { "\n" });
        debug!(
            tokens = tokens.len(),
            matched = matched.len(),
            layers = layer_names.len(),
            "generated css"
        );
        Ok(GenerateResult {
            css,
            matched,
            layers: layer_names,
        })
    }

    fn resolve(&self, token: &str, depth: usize) -> Option<Resolution> {
        let (important, token) = match token.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, token),
        };
        let (applies, body) = self.strip_variants(token);

        if depth < MAX_SHORTCUT_DEPTH
            && let Some(expansion) = self.shortcuts.get(&body)
        {
            let mut fragments = Vec::new();
            for part in expansion.split_whitespace() {
                let Some(inner) = self.resolve(part, depth + 1) else {
                    continue;
                };
                for mut fragment in inner.fragments {
                    let mut combined = applies.clone();
                    combined.append(&mut fragment.applies);
                    fragment.applies = combined;
                    fragment.important |= important;
                    fragments.push(fragment);
                }
            }
            if fragments.is_empty() {
                return None;
            }
            return Some(Resolution {
                origin: Origin::Shortcut,
                layer: LAYER_SHORTCUTS.to_string(),
                fragments,
            });
        }

        self.rules
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, rule)| {
                rule.matches(&body, &self.theme).map(|output| Resolution {
                    origin: Origin::Rule(index),
                    layer: rule.layer().unwrap_or(LAYER_DEFAULT).to_string(),
                    fragments: vec![Fragment {
                        applies: applies.clone(),
                        important,
                        output,
                    }],
                })
            })
    }

    fn strip_variants(&self, token: &str) -> (Vec<VariantApply>, String) {
        let mut applies = Vec::new();
        let mut rest = token.to_string();
        'outer: for _ in 0..MAX_VARIANTS {
            for variant in &self.variants {
                if let Some(m) = variant.match_variant(&rest, &self.theme) {
                    applies.push(m.apply);
                    rest = m.rest;
                    continue 'outer;
                }
            }
            break;
        }
        (applies, rest)
    }
}

/// Render one token's fragments into CSS rules, recording globals in `buffer`.
fn render_token(token: &str, fragments: &[Fragment], buffer: &mut LayerBuffer) -> Vec<String> {
    let base = format!(".{}", escape_selector(token));
    let mut groups: IndexMap<(Vec<VariantApply>, Option<String>), IndexMap<String, String>> =
        IndexMap::new();

    for fragment in fragments {
        let mut targets: Vec<(Option<String>, &Declarations)> =
            vec![(None, &fragment.output.declarations)];
        targets.extend(
            fragment
                .output
                .nested
                .iter()
                .map(|(template, decls)| (Some(template.clone()), decls)),
        );
        for (template, declarations) in targets {
            if declarations.is_empty() {
                continue;
            }
            let group = groups
                .entry((fragment.applies.clone(), template))
                .or_default();
            for (property, value) in declarations {
                let value = if fragment.important && !value.ends_with("!important") {
                    format!("{} !important", value)
                } else {
                    value.clone()
                };
                group.shift_remove(property);
                group.insert(property.clone(), value);
            }
        }
        for global in &fragment.output.global {
            buffer.globals.insert(global.clone());
        }
    }

    groups
        .into_iter()
        .map(|((applies, template), declarations)| {
            let (selector, media) = build_selector(&base, &applies, template.as_deref());
            let body: String = declarations
                .iter()
                .map(|(p, v)| format!("{}:{};", p, v))
                .collect();
            let rule = format!("{}{{{}}}", selector, body);
            if media.is_empty() {
                rule
            } else {
                format!("@media {}{{{}}}", media.join(" and "), rule)
            }
        })
        .collect()
}

fn build_selector(
    base: &str,
    applies: &[VariantApply],
    template: Option<&str>,
) -> (String, Vec<String>) {
    let mut selector = base.to_string();
    let mut pseudo = String::new();
    let mut parents = Vec::new();
    let mut media = Vec::new();
    for apply in applies {
        match apply {
            VariantApply::Selector(s) => selector = s.clone(),
            VariantApply::Pseudo(p) => pseudo.push_str(p),
            VariantApply::Parent(p) => parents.push(p.as_str()),
            VariantApply::Media(m) => media.push(m.clone()),
        }
    }
    let mut selector = format!("{}{}", selector, pseudo);
    if let Some(template) = template {
        selector = template.replace("$$", &selector);
    }
    for parent in parents.iter().rev() {
        selector = format!("{} {}", parent, selector);
    }
    (selector, media)
}
