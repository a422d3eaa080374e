//! Core variants.
//!
//! Copyright (c) 2025 Posit, PBC

use std::sync::Arc;

use atomcss_engine::{BreakpointVariant, ParentVariant, PseudoVariant, Variant};

const PSEUDO_CLASSES: &[(&str, &str)] = &[
    ("hover", ":hover"),
    ("focus", ":focus"),
    ("focus-visible", ":focus-visible"),
    ("focus-within", ":focus-within"),
    ("active", ":active"),
    ("visited", ":visited"),
    ("disabled", ":disabled"),
    ("checked", ":checked"),
    ("first", ":first-child"),
    ("last", ":last-child"),
    ("odd", ":nth-child(odd)"),
    ("even", ":nth-child(even)"),
    ("before", "::before"),
    ("after", "::after"),
    ("placeholder", "::placeholder"),
];

pub fn variants() -> Vec<Arc<dyn Variant>> {
    let mut variants: Vec<Arc<dyn Variant>> = PSEUDO_CLASSES
        .iter()
        .map(|(name, pseudo)| Arc::new(PseudoVariant::new(*name, *pseudo)) as Arc<dyn Variant>)
        .collect();
    variants.push(Arc::new(ParentVariant::new("dark", ".dark")));
    variants.push(Arc::new(ParentVariant::new("light", ".light")));
    variants.push(Arc::new(BreakpointVariant));
    variants
}
