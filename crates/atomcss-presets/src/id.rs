//! Preset identifiers.
//!
//! Copyright (c) 2025 Posit, PBC

use std::fmt;
use std::str::FromStr;

use crate::error::PresetError;

/// Built-in presets that an `@import` can activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PresetId {
    Uno,
    Wind,
    Mini,
    Typography,
    WebFonts,
    Tagify,
    Icons,
    Attributify,
}

impl PresetId {
    /// Get the module name used in imports.
    pub fn name(&self) -> &'static str {
        match self {
            PresetId::Uno => "preset-uno",
            PresetId::Wind => "preset-wind",
            PresetId::Mini => "preset-mini",
            PresetId::Typography => "preset-typography",
            PresetId::WebFonts => "preset-web-fonts",
            PresetId::Tagify => "preset-tagify",
            PresetId::Icons => "preset-icons",
            PresetId::Attributify => "preset-attributify",
        }
    }

    pub fn all() -> &'static [PresetId] {
        &[
            PresetId::Uno,
            PresetId::Wind,
            PresetId::Mini,
            PresetId::Typography,
            PresetId::WebFonts,
            PresetId::Tagify,
            PresetId::Icons,
            PresetId::Attributify,
        ]
    }

    /// Check if a module name refers to a built-in preset.
    pub fn is_known(name: &str) -> bool {
        name.parse::<PresetId>().is_ok()
    }
}

impl FromStr for PresetId {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetId::all()
            .iter()
            .copied()
            .find(|id| id.name() == s)
            .ok_or_else(|| PresetError::UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for id in PresetId::all() {
            assert_eq!(id.name().parse::<PresetId>().unwrap(), *id);
            assert_eq!(id.to_string(), id.name());
        }
    }

    #[test]
    fn test_unknown_name() {
        assert!(!PresetId::is_known("preset-nonsense"));
        assert!(!PresetId::is_known("uno"));
        let err = "preset-nonsense".parse::<PresetId>().unwrap_err();
        assert_eq!(err.to_string(), "unknown preset module: preset-nonsense");
    }
}
