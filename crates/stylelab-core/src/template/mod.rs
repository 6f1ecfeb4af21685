//! Template module - stylesheet templating with declared defaults
//!
//! This module provides a lightweight template layer over a stylesheet: the
//! template source declares a fixed set of named variables together with
//! their default values, and interpolation substitutes metadata-supplied
//! values at render time.
//!
//! ## Philosophy
//!
//! - **Pure text substitution**: no expressions, nesting, or conditionals
//! - **Defaults live in the template**: each variable declares its fallback
//!   alongside its placeholder, so the stylesheet is self-describing
//! - **Never fatal on malformed markers**: anything that is not a
//!   well-formed placeholder stays literal text
//!
//! ## Syntax
//!
//! - Placeholder: `$name$`
//! - Placeholder with declared default: `$name:default$`
//! - `name` is `[A-Za-z_][A-Za-z0-9_-]*`
//! - `default` runs to the closing `$`; it may be empty and may not contain
//!   `$` or a newline
//! - A `$` that does not open a well-formed marker is ordinary text

pub mod error;
pub mod interpolate;
pub mod parse;

pub use error::TemplateError;
pub use interpolate::interpolate;
pub use parse::{extract_defaults, parse, Segment, Template};
