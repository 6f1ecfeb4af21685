//! Document metadata mapping shared across the engine.
//!
//! Metadata is owned by the document and mutated by the editing layer; this
//! crate only ever reads it.

use toml::Value;

/// Metadata mapping read from a document's front matter.
pub type Meta = toml::map::Map<String, Value>;

/// Coerce a metadata value to its textual representation.
///
/// Strings pass through unchanged; integers, floats, booleans and datetimes
/// use their canonical display form. Arrays and tables have no single
/// textual form and yield `None`.
pub fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Boolean(b) => Some(b.to_string()),
        Value::Datetime(dt) => Some(dt.to_string()),
        Value::Array(_) | Value::Table(_) => None,
    }
}
