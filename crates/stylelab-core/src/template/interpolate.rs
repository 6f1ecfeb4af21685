//! Metadata-driven interpolation
//!
//! A pure function from template and metadata to finished stylesheet text.
//! No escaping or sanitization of substituted values is performed: the
//! contract is string in, string out, not safe CSS out.

use crate::meta::{coerce_string, Meta};
use crate::template::parse::{Segment, Template};

/// Render a template against a metadata mapping.
///
/// Literal segments pass through verbatim. A variable resolves to the
/// metadata value coerced to a string if present and non-empty, else its
/// declared default, else the empty string.
pub fn interpolate(template: &Template, meta: &Meta) -> String {
    let mut output = String::with_capacity(template.source().len());

    for segment in template.segments() {
        match segment {
            Segment::Literal(text) => output.push_str(text),
            Segment::Variable { name, .. } => {
                let supplied = meta
                    .get(name)
                    .and_then(coerce_string)
                    .filter(|value| !value.is_empty());
                match supplied {
                    Some(value) => output.push_str(&value),
                    None => {
                        if let Some(default) = template.defaults().get(name) {
                            output.push_str(default);
                        }
                    }
                }
            }
        }
    }

    output
}
