//! Bundled preview stylesheet
//!
//! The base stylesheet ships inside the binary and is parsed once, at first
//! use, for the lifetime of the process.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::template::{extract_defaults, parse, Template};

const PREVIEW_CSS: &str = include_str!("../../assets/preview.css");

static BUILTIN_TEMPLATE: Lazy<Template> =
    Lazy::new(|| parse(PREVIEW_CSS).expect("bundled preview stylesheet parses"));

static BUILTIN_DEFAULTS: Lazy<BTreeMap<String, String>> =
    Lazy::new(|| extract_defaults(builtin_template()));

/// The parsed bundled stylesheet
pub fn builtin_template() -> &'static Template {
    &BUILTIN_TEMPLATE
}

/// Declared defaults of the bundled stylesheet, by variable name
pub fn builtin_defaults() -> &'static BTreeMap<String, String> {
    &BUILTIN_DEFAULTS
}
