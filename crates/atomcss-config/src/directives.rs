//! `@import` and `@keyframes` handling.
//!
//! Copyright (c) 2025 Posit, PBC

use atomcss_engine::AnimationKind;
use atomcss_presets::{PresetId, WebFontProvider};
use atomcss_syntax::{AtRule, Prelude, PreludeToken, camel_case, generate_block};
use tracing::debug;

use crate::configuration::Configuration;
use crate::error::{ConfigError, Result};
use crate::reset::Reset;

/// Package scope accepted in front of import targets.
const SCOPE_PREFIX: &str = "@unocss/";
const RESET: &str = "reset";

/// The target of `@import "x"` or `@import url(x)`.
fn import_target(prelude: &Prelude) -> Option<&str> {
    match prelude.first()? {
        PreludeToken::String(target) => Some(target),
        PreludeToken::Function { name, args } if name.eq_ignore_ascii_case("url") => {
            args.first().map(String::as_str)
        }
        _ => None,
    }
}

/// Apply an `@import`: select a reset or activate a preset.
///
/// Targets naming neither are ignored.
pub(crate) fn import(config: &mut Configuration, at_rule: &AtRule) -> Result<()> {
    let Some(target) = at_rule.prelude.as_ref().and_then(import_target) else {
        return Ok(());
    };
    let target = target.strip_prefix(SCOPE_PREFIX).unwrap_or(target);
    let (base, subpath) = match target.split_once('/') {
        Some((base, subpath)) => (base, Some(subpath)),
        None => (target, None),
    };

    if base == RESET {
        let reset = Reset::from_subpath(subpath)?;
        debug!(reset = %reset, "selecting reset");
        config.reset = Some(reset);
        return Ok(());
    }

    let Ok(id) = base.parse::<PresetId>() else {
        debug!(import = %target, "ignoring unrecognized import");
        return Ok(());
    };
    if id == PresetId::WebFonts {
        config.web_fonts_provider = match subpath {
            None | Some("") => WebFontProvider::default(),
            Some(name) => name
                .parse::<WebFontProvider>()
                .map_err(ConfigError::InvalidProvider)?,
        };
    }
    if config.presets.insert(id) {
        debug!(preset = %id, "activating preset");
    }
    Ok(())
}

/// Store `@keyframes <name> { ... }` verbatim under `theme.animation.keyframes`.
pub(crate) fn keyframes(config: &mut Configuration, at_rule: &AtRule) {
    let Some(block) = &at_rule.block else {
        return;
    };
    let name = match at_rule.prelude.as_ref().and_then(Prelude::first) {
        Some(PreludeToken::Identifier(name) | PreludeToken::String(name)) => name,
        _ => return,
    };
    config.theme.insert_animation(
        AnimationKind::Keyframes,
        camel_case(name),
        generate_block(block),
    );
}
