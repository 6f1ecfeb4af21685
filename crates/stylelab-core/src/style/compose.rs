//! Final stylesheet composition
//!
//! Combines the interpolated base stylesheet, the cached per-type header
//! fragment, and the global override into the text handed to the rendering
//! surface. Later parts override earlier ones in the CSS cascade, so the
//! order is a correctness requirement, not cosmetic.

use toml::Value;

use crate::datadir::DataDir;
use crate::meta::{coerce_string, Meta};
use crate::settings::Settings;
use crate::style::builtin::builtin_template;
use crate::style::cache::StyleCache;
use crate::template::{interpolate, Template};

/// Metadata key selecting the per-type override file
pub const TYPE_KEY: &str = "type";

/// Metadata key carrying document-specific CSS
pub const CSS_KEY: &str = "css";

/// Top-level entry point producing the preview stylesheet.
///
/// Owns the parsed template and the per-type cache, so separate documents
/// or windows each get their own composer and cannot corrupt each other's
/// cache state.
#[derive(Debug)]
pub struct StyleComposer {
    template: Template,
    cache: StyleCache,
}

impl StyleComposer {
    pub fn new(template: Template, data_dir: DataDir) -> Self {
        Self {
            template,
            cache: StyleCache::new(data_dir),
        }
    }

    /// Composer over the bundled preview stylesheet
    pub fn builtin(data_dir: DataDir) -> Self {
        Self::new(builtin_template().clone(), data_dir)
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Produce the final stylesheet for a document.
    ///
    /// Fixed order: interpolated base, then the per-type header fragment,
    /// then the global settings CSS. The global fragment is included only
    /// when the metadata defines no document-specific `css` value. All
    /// parts are awaited before concatenation; partial results are never
    /// surfaced.
    pub async fn compose(&self, meta: &Meta, settings: &Settings) -> String {
        let base = interpolate(&self.template, meta);

        let doc_type = meta.get(TYPE_KEY).and_then(Value::as_str);
        let header = self.cache.header_css(doc_type).await;

        let global = if has_document_css(meta) {
            ""
        } else {
            settings.global_css.as_str()
        };

        format!("{}\n{}\n{}", base, header, global)
    }
}

/// Whether the document carries its own CSS, suppressing the global
/// override. A `css` value that coerces to a non-empty string counts.
fn has_document_css(meta: &Meta) -> bool {
    meta.get(CSS_KEY)
        .and_then(coerce_string)
        .map(|css| !css.is_empty())
        .unwrap_or(false)
}
