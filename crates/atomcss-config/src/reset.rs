//! Reset stylesheets.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! `@import "reset"` or `@import "reset/<name>"` selects one of the embedded
//! resets, which is prefixed verbatim to the generated CSS.

use std::str::FromStr;

use include_dir::{Dir, include_dir};

use crate::error::ConfigError;

static RESETS_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/resets");

/// Built-in reset stylesheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Reset {
    #[default]
    Tailwind,
    TailwindCompat,
    Normalize,
    EricMeyer,
    Sanitize,
}

impl Reset {
    /// Name used after `reset/` in imports.
    pub fn name(&self) -> &'static str {
        match self {
            Reset::Tailwind => "tailwind",
            Reset::TailwindCompat => "tailwind-compat",
            Reset::Normalize => "normalize",
            Reset::EricMeyer => "eric-meyer",
            Reset::Sanitize => "sanitize",
        }
    }

    pub fn filename(&self) -> String {
        format!("{}.css", self.name())
    }

    pub fn all() -> &'static [Reset] {
        &[
            Reset::Tailwind,
            Reset::TailwindCompat,
            Reset::Normalize,
            Reset::EricMeyer,
            Reset::Sanitize,
        ]
    }

    /// Resolve the sub-path of a reset import; no sub-path means the default.
    pub fn from_subpath(subpath: Option<&str>) -> Result<Self, ConfigError> {
        match subpath {
            None | Some("") => Ok(Reset::default()),
            Some(name) => name.strip_suffix(".css").unwrap_or(name).parse(),
        }
    }

    /// The stylesheet text.
    pub fn css(&self) -> &'static str {
        RESETS_DIR
            .get_file(self.filename())
            .and_then(|file| file.contents_utf8())
            .unwrap_or_default()
    }
}

impl FromStr for Reset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Reset::all()
            .iter()
            .copied()
            .find(|reset| reset.name() == s)
            .ok_or_else(|| ConfigError::InvalidReset(s.to_string()))
    }
}

impl std::fmt::Display for Reset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_reset_is_embedded() {
        for reset in Reset::all() {
            assert!(!reset.css().is_empty(), "{} is empty", reset);
        }
    }

    #[test]
    fn test_from_subpath() {
        assert_eq!(Reset::from_subpath(None).unwrap(), Reset::Tailwind);
        assert_eq!(
            Reset::from_subpath(Some("eric-meyer")).unwrap(),
            Reset::EricMeyer
        );
        assert_eq!(
            Reset::from_subpath(Some("normalize.css")).unwrap(),
            Reset::Normalize
        );
        let err = Reset::from_subpath(Some("bootstrap")).unwrap_err();
        assert_eq!(err.to_string(), "invalid reset selector: bootstrap");
    }

    #[test]
    fn test_eric_meyer_text() {
        assert!(Reset::EricMeyer.css().starts_with("/* http://meyerweb.com/eric/tools/css/reset/"));
    }
}
