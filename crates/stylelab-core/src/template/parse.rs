//! Template parsing and default-variable extraction
//!
//! Parsing is a single forward-only scan over the source, O(length). The
//! scanner splits the source into literal and variable segments in original
//! order and collects each variable's declared default as it goes.

use std::collections::BTreeMap;

use crate::template::error::TemplateError;

/// One piece of a parsed template, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Verbatim stylesheet text
    Literal(String),
    /// A variable placeholder
    Variable {
        /// Variable name
        name: String,
        /// Original marker text, kept so the segment sequence can
        /// reproduce the source exactly
        raw: String,
    },
}

/// An immutable parsed template.
///
/// Invariant: concatenating the literal segments and each variable segment's
/// `raw` marker text reproduces `source` exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
    defaults: BTreeMap<String, String>,
}

impl Template {
    /// The raw source this template was parsed from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Literal and variable segments in source order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Declared default per referenced variable name
    ///
    /// Every referenced name has an entry; a variable that never declared a
    /// default maps to the empty string.
    pub fn defaults(&self) -> &BTreeMap<String, String> {
        &self.defaults
    }
}

/// A well-formed `$name$` / `$name:default$` marker found in the source
struct Marker<'a> {
    name: &'a str,
    default: Option<&'a str>,
    raw: &'a str,
}

/// Parse a raw stylesheet-with-placeholders into a [`Template`].
///
/// Malformed markers (unclosed `$`, invalid name, newline inside the marker)
/// are treated as literal text and never fail the parse. The only parse
/// error is two conflicting default declarations for one variable name.
///
/// Deterministic: identical input yields a structurally identical template.
pub fn parse(raw: &str) -> Result<Template, TemplateError> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut declared: BTreeMap<String, Option<String>> = BTreeMap::new();
    let mut literal = String::new();
    let mut pos = 0;
    let mut line = 1;

    while pos < raw.len() {
        let remaining = &raw[pos..];
        let Some(open) = remaining.find('$') else {
            literal.push_str(remaining);
            break;
        };

        let text = &remaining[..open];
        literal.push_str(text);
        line += count_newlines(text);

        match scan_marker(&remaining[open..]) {
            Some(marker) => {
                flush_literal(&mut literal, &mut segments);
                declare_default(&mut declared, &marker, line)?;
                segments.push(Segment::Variable {
                    name: marker.name.to_string(),
                    raw: marker.raw.to_string(),
                });
                pos += open + marker.raw.len();
            }
            None => {
                // not a marker; the `$` is ordinary text
                literal.push('$');
                pos += open + 1;
            }
        }
    }
    flush_literal(&mut literal, &mut segments);

    let defaults = declared
        .into_iter()
        .map(|(name, default)| (name, default.unwrap_or_default()))
        .collect();

    Ok(Template {
        source: raw.to_string(),
        segments,
        defaults,
    })
}

/// Return the default map collected during parsing.
///
/// Pure over the parsed template; exposed separately so defaults can be
/// inspected and tested independently of interpolation.
pub fn extract_defaults(template: &Template) -> BTreeMap<String, String> {
    template.defaults().clone()
}

/// Scan a marker at the start of `s` (which begins with `$`).
///
/// Returns `None` when `s` does not begin with a well-formed marker; the
/// caller then treats the `$` as literal text and rescans from the next byte.
fn scan_marker(s: &str) -> Option<Marker<'_>> {
    let body_and_rest = &s[1..];
    let close = body_and_rest.find('$')?;
    let body = &body_and_rest[..close];
    if body.contains('\n') {
        return None;
    }
    let (name, default) = match body.find(':') {
        Some(colon) => (&body[..colon], Some(&body[colon + 1..])),
        None => (body, None),
    };
    if !is_valid_name(name) {
        return None;
    }
    Some(Marker {
        name,
        default,
        raw: &s[..close + 2],
    })
}

/// Variable names are `[A-Za-z_][A-Za-z0-9_-]*`
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Record a marker's default declaration.
///
/// Declarations are order-independent: the default may appear at any
/// occurrence, re-declaring the same value is fine, re-declaring a different
/// value is a parse error.
fn declare_default(
    declared: &mut BTreeMap<String, Option<String>>,
    marker: &Marker<'_>,
    line: usize,
) -> Result<(), TemplateError> {
    match marker.default {
        Some(default) => {
            let previous = declared.insert(marker.name.to_string(), Some(default.to_string()));
            if let Some(Some(existing)) = previous {
                if existing != default {
                    return Err(TemplateError::ConflictingDefault {
                        name: marker.name.to_string(),
                        first: existing,
                        second: default.to_string(),
                        line,
                    });
                }
            }
        }
        None => {
            declared.entry(marker.name.to_string()).or_insert(None);
        }
    }
    Ok(())
}

fn flush_literal(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

fn count_newlines(text: &str) -> usize {
    text.chars().filter(|&c| c == '\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct(template: &Template) -> String {
        template
            .segments()
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.as_str(),
                Segment::Variable { raw, .. } => raw.as_str(),
            })
            .collect()
    }

    #[test]
    fn test_parse_single_placeholder() {
        let template = parse("body{color:$color$}").unwrap();
        assert_eq!(
            template.segments(),
            &[
                Segment::Literal("body{color:".to_string()),
                Segment::Variable {
                    name: "color".to_string(),
                    raw: "$color$".to_string(),
                },
                Segment::Literal("}".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_placeholder_with_default() {
        let template = parse("body{color:$color:#000$}").unwrap();
        assert_eq!(template.defaults().get("color"), Some(&"#000".to_string()));
        assert_eq!(
            template.segments()[1],
            Segment::Variable {
                name: "color".to_string(),
                raw: "$color:#000$".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_multiple_placeholders() {
        let template = parse("$a:1$ $b:2$ $c$").unwrap();
        let names: Vec<&str> = template
            .segments()
            .iter()
            .filter_map(|segment| match segment {
                Segment::Variable { name, .. } => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(template.defaults().get("a"), Some(&"1".to_string()));
        assert_eq!(template.defaults().get("b"), Some(&"2".to_string()));
        assert_eq!(template.defaults().get("c"), Some(&String::new()));
    }

    #[test]
    fn test_parse_no_placeholders() {
        let template = parse("body { margin: 0; }").unwrap();
        assert_eq!(
            template.segments(),
            &[Segment::Literal("body { margin: 0; }".to_string())]
        );
        assert!(template.defaults().is_empty());
    }

    #[test]
    fn test_parse_empty_input() {
        let template = parse("").unwrap();
        assert!(template.segments().is_empty());
        assert!(template.defaults().is_empty());
    }

    #[test]
    fn test_unclosed_marker_is_literal() {
        let template = parse("price: 12$").unwrap();
        assert_eq!(
            template.segments(),
            &[Segment::Literal("price: 12$".to_string())]
        );
    }

    #[test]
    fn test_invalid_name_is_literal() {
        // body between the dollars is not a valid variable name
        let template = parse("a $1bad$ b").unwrap();
        assert_eq!(
            template.segments(),
            &[Segment::Literal("a $1bad$ b".to_string())]
        );
    }

    #[test]
    fn test_marker_spanning_newline_is_literal() {
        let template = parse("a$\nb$c").unwrap();
        assert!(template.defaults().is_empty());
        assert_eq!(reconstruct(&template), "a$\nb$c");
    }

    #[test]
    fn test_two_bare_dollars_are_literal() {
        let template = parse("$$").unwrap();
        assert_eq!(template.segments(), &[Segment::Literal("$$".to_string())]);
    }

    #[test]
    fn test_rejected_marker_does_not_swallow_later_marker() {
        // the first pair of dollars is not a marker, the later one is
        let template = parse("content: '$foo bar$'; color: $fontcolor:#000$;").unwrap();
        assert_eq!(
            template.defaults().get("fontcolor"),
            Some(&"#000".to_string())
        );
        assert_eq!(reconstruct(&template), "content: '$foo bar$'; color: $fontcolor:#000$;");
    }

    #[test]
    fn test_empty_default_is_declared() {
        let template = parse("$css:$").unwrap();
        assert_eq!(template.defaults().get("css"), Some(&String::new()));
    }

    #[test]
    fn test_default_may_contain_colons() {
        let template = parse("$font:'Source Serif Pro', serif$").unwrap();
        assert_eq!(
            template.defaults().get("font"),
            Some(&"'Source Serif Pro', serif".to_string())
        );
    }

    #[test]
    fn test_declaration_at_later_occurrence() {
        // declarations are order-independent
        let template = parse("$color$ and $color:#000$").unwrap();
        assert_eq!(template.defaults().get("color"), Some(&"#000".to_string()));
    }

    #[test]
    fn test_identical_redeclaration_is_ok() {
        let template = parse("$color:#000$ $color:#000$").unwrap();
        assert_eq!(template.defaults().get("color"), Some(&"#000".to_string()));
    }

    #[test]
    fn test_conflicting_defaults_are_an_error() {
        let result = parse("$color:#000$\n$color:#fff$");
        match result {
            Err(TemplateError::ConflictingDefault {
                name,
                first,
                second,
                line,
            }) => {
                assert_eq!(name, "color");
                assert_eq!(first, "#000");
                assert_eq!(second, "#fff");
                assert_eq!(line, 2);
            }
            other => panic!("Expected ConflictingDefault, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_is_deterministic() {
        let source = "h1 { font: $mainfont:serif$; }\npre { font: $monofont$; }";
        let first = parse(source).unwrap();
        let second = parse(source).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_segments_reproduce_source() {
        let source = "body {\n  color: $fontcolor:#111$;\n  max-width: $maxwidth$;\n}\n/* 5$ */";
        let template = parse(source).unwrap();
        assert_eq!(reconstruct(&template), source);
        assert_eq!(template.source(), source);
    }

    #[test]
    fn test_extract_defaults_covers_every_referenced_name() {
        let template = parse("$a:x$ $b$ $c:$").unwrap();
        let defaults = extract_defaults(&template);
        assert_eq!(defaults.len(), 3);
        assert_eq!(defaults.get("a"), Some(&"x".to_string()));
        assert_eq!(defaults.get("b"), Some(&String::new()));
        assert_eq!(defaults.get("c"), Some(&String::new()));
    }
}
