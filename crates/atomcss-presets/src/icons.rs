//! Icons preset: pure-CSS icons from iconify collections.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! `i-<collection>-<icon>` (or `i-<collection>:<icon>`) renders the icon as a
//! mask (icons drawn with `currentColor`) or a background image. Collections
//! are loaded on demand in [`Preset::prepare`] through the asset cache. A
//! collection that cannot be loaded is reported once and its icons do not
//! match.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use atomcss_cache::{AssetCache, icon_collection_url};
use atomcss_engine::{Preset, Rule, RuleOutput};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::PresetError;

const PREFIX: &str = "i-";
const SCALE: &str = "1.2em";

/// Collections recognized in the `i-<collection>-<icon>` form. Any collection
/// can be used with the `i-<collection>:<icon>` form.
const COLLECTIONS: &[&str] = &[
    "akar-icons",
    "ant-design",
    "bi",
    "bx",
    "bxl",
    "carbon",
    "codicon",
    "devicon",
    "fa6-brands",
    "fa6-regular",
    "fa6-solid",
    "fluent",
    "gg",
    "heroicons",
    "heroicons-outline",
    "heroicons-solid",
    "ic",
    "icon-park",
    "icon-park-outline",
    "iconoir",
    "ion",
    "la",
    "line-md",
    "logos",
    "lucide",
    "majesticons",
    "material-symbols",
    "mdi",
    "mdi-light",
    "mingcute",
    "octicon",
    "ph",
    "radix-icons",
    "ri",
    "simple-icons",
    "solar",
    "svg-spinners",
    "tabler",
    "twemoji",
    "uil",
    "vscode-icons",
];

#[derive(Debug, Clone, Deserialize)]
struct IconData {
    body: String,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
struct IconAlias {
    parent: String,
}

/// An iconify collection (`icons.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct IconSet {
    prefix: String,
    icons: HashMap<String, IconData>,
    #[serde(default)]
    aliases: HashMap<String, IconAlias>,
    width: Option<u32>,
    height: Option<u32>,
}

impl IconSet {
    pub fn parse(collection: &str, json: &str) -> Result<Self, PresetError> {
        serde_json::from_str(json).map_err(|source| PresetError::IconCollection {
            collection: collection.to_string(),
            source,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Full SVG markup of an icon, following aliases.
    pub fn svg(&self, name: &str) -> Option<String> {
        let mut name = name;
        for _ in 0..8 {
            if let Some(icon) = self.icons.get(name) {
                let width = icon.width.or(self.width).unwrap_or(16);
                let height = icon.height.or(self.height).unwrap_or(16);
                return Some(format!(
                    "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\" width=\"{}\" height=\"{}\">{}</svg>",
                    width, height, SCALE, SCALE, icon.body
                ));
            }
            name = &self.aliases.get(name)?.parent;
        }
        None
    }
}

/// Encode SVG markup for a `url("data:...")` value.
pub fn svg_data_uri(svg: &str) -> String {
    let mut out = String::from("data:image/svg+xml;utf8,");
    let mut last_space = false;
    for ch in svg.chars() {
        if ch.is_whitespace() {
            if !last_space {
                out.push(' ');
            }
            last_space = true;
            continue;
        }
        last_space = false;
        match ch {
            '"' => out.push('\''),
            '%' => out.push_str("%25"),
            '#' => out.push_str("%23"),
            '{' => out.push_str("%7B"),
            '}' => out.push_str("%7D"),
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            _ => out.push(ch),
        }
    }
    out
}

fn icon_output(svg: &str) -> RuleOutput {
    let uri = format!("url(\"{}\")", svg_data_uri(svg));
    if svg.contains("currentColor") {
        RuleOutput::from_pairs(&[
            ("--un-icon", uri.as_str()),
            ("-webkit-mask", "var(--un-icon) no-repeat"),
            ("mask", "var(--un-icon) no-repeat"),
            ("-webkit-mask-size", "100% 100%"),
            ("mask-size", "100% 100%"),
            ("background-color", "currentColor"),
            ("color", "inherit"),
            ("width", SCALE),
            ("height", SCALE),
        ])
    } else {
        RuleOutput::from_pairs(&[
            ("background", &format!("{} no-repeat", uri)),
            ("background-size", "100% 100%"),
            ("background-color", "transparent"),
            ("width", SCALE),
            ("height", SCALE),
        ])
    }
}

/// Split an icon utility body into `(collection, icon)`.
///
/// Without a `:` the longest recognized collection prefix wins.
fn split_icon(body: &str) -> Option<(&str, &str)> {
    if let Some((collection, icon)) = body.split_once(':') {
        return (is_collection_name(collection) && !icon.is_empty()).then_some((collection, icon));
    }
    COLLECTIONS
        .iter()
        .filter_map(|c| {
            body.strip_prefix(c)
                .and_then(|rest| rest.strip_prefix('-'))
                .filter(|rest| !rest.is_empty())
                .map(|rest| (*c, rest))
        })
        .max_by_key(|(c, _)| c.len())
}

/// Iconify collection names are lowercase ASCII, digits and dashes.
fn is_collection_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Icon utility bodies referenced by a token, ignoring variant prefixes.
fn icon_bodies(token: &str) -> impl Iterator<Item = &str> {
    let token = token.strip_prefix('!').unwrap_or(token);
    std::iter::once(token)
        .chain(token.match_indices(':').map(move |(idx, _)| &token[idx + 1..]))
        .filter_map(|candidate| candidate.strip_prefix(PREFIX))
}

type Loaded = Arc<RwLock<HashMap<String, Arc<IconSet>>>>;

pub struct PresetIcons {
    cache: Arc<AssetCache>,
    loaded: Loaded,
    /// Collections that failed to load; not retried
    unavailable: RwLock<HashSet<String>>,
}

impl PresetIcons {
    pub fn new(cache: Arc<AssetCache>) -> Self {
        Self {
            cache,
            loaded: Arc::default(),
            unavailable: RwLock::default(),
        }
    }

    fn is_loaded(&self, collection: &str) -> bool {
        self.loaded
            .read()
            .is_ok_and(|loaded| loaded.contains_key(collection))
    }

    fn is_unavailable(&self, collection: &str) -> bool {
        self.unavailable
            .read()
            .is_ok_and(|unavailable| unavailable.contains(collection))
    }

    async fn load(&self, collection: &str) -> Result<IconSet, PresetError> {
        let json = self
            .cache
            .fetch_icon_collection(&icon_collection_url(collection))
            .await?;
        IconSet::parse(collection, &json)
    }
}

#[async_trait]
impl Preset for PresetIcons {
    fn name(&self) -> &str {
        "preset-icons"
    }

    fn rules(&self) -> Vec<Rule> {
        let loaded = self.loaded.clone();
        vec![Rule::dynamic(r"i-(.+)", move |caps, _| {
            let (collection, icon) = split_icon(&caps[1])?;
            let set = loaded.read().ok()?.get(collection).cloned()?;
            let svg = set.svg(icon)?;
            Some(icon_output(&svg))
        })
        .with_layer("icons")]
    }

    async fn prepare(
        &self,
        tokens: &BTreeSet<String>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let wanted: BTreeSet<&str> = tokens
            .iter()
            .flat_map(|t| icon_bodies(t))
            .filter_map(split_icon)
            .map(|(collection, _)| collection)
            .filter(|collection| !self.is_loaded(collection) && !self.is_unavailable(collection))
            .collect();

        // Collection names come from content, so a failure only means the
        // token is not an icon
        for collection in wanted {
            info!(collection = %collection, "loading icon collection");
            match self.load(collection).await {
                Ok(set) => {
                    debug!(collection = %collection, icons = set.icons.len(), "icon collection loaded");
                    if let Ok(mut loaded) = self.loaded.write() {
                        loaded.insert(collection.to_string(), Arc::new(set));
                    }
                }
                Err(e) => {
                    warn!(collection = %collection, error = %e, "icon collection unavailable");
                    if let Ok(mut unavailable) = self.unavailable.write() {
                        unavailable.insert(collection.to_string());
                    }
                }
            }
        }
        Ok(())
    }
}
