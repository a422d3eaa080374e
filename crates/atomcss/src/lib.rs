//! Atomic CSS generation driven by CSS configuration documents.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! A configuration document declares presets, theme values, shortcuts, raw
//! CSS and a reset stylesheet. [`Session`] compiles it once and then turns the
//! utility tokens found in content into CSS:
//!
//! ```no_run
//! # async fn demo() -> atomcss::Result<()> {
//! let mut session = atomcss::Session::init(atomcss::Options {
//!     config: Some(".btn { --uno: px-4 font-bold; }".to_string()),
//!     ..Default::default()
//! })
//! .await?;
//! session.update_default(r#"<button class="btn flex">"#);
//! let css = session.generate().await?;
//! # let _ = css;
//! # Ok(())
//! # }
//! ```

mod error;
mod options;
mod session;

pub use atomcss_config::{Configuration, Reset};
pub use atomcss_engine::GenerateOptions;
pub use error::{Error, Result};
pub use options::Options;
pub use session::{DEFAULT_SOURCE, Session, generate};
