//! Built-in atomcss presets
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Every preset an `@import` can activate, plus the registry that builds
//! them by identifier.

pub mod attributify;
pub mod color;
pub mod error;
pub mod icons;
pub mod id;
pub mod mini;
pub mod registry;
pub mod tagify;
pub mod typography;
pub mod web_fonts;
pub mod wind;

pub use attributify::PresetAttributify;
pub use error::{PresetError, Result};
pub use icons::{IconSet, PresetIcons};
pub use id::PresetId;
pub use mini::PresetMini;
pub use registry::{Constructor, PresetContext, PresetRegistry, registry};
pub use tagify::PresetTagify;
pub use typography::PresetTypography;
pub use web_fonts::{PresetWebFonts, WebFont, WebFontProvider};
pub use wind::PresetWind;
