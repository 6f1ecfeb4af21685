//! Per-document-type style override cache
//!
//! Each document type may ship a style fragment in `<type>.toml` inside the
//! data directory. The cache holds the fragment for the one active type and
//! re-reads only when the requested type changes.

use tokio::sync::Mutex;
use toml::Value;

use crate::datadir::DataDir;

/// Field of the per-type file holding the style fragment
pub const HEADER_INCLUDES_KEY: &str = "header-includes";

/// Type used when a document declares none
pub const DEFAULT_DOC_TYPE: &str = "default";

#[derive(Debug, Clone)]
struct CacheEntry {
    doc_type: String,
    header_css: String,
}

/// Owned single-entry cache of the active document type's header fragment.
///
/// The entry is replaced wholesale on type change; switching documents
/// discards the previous fragment. The mutex is held across the fetch, so
/// concurrent requests coalesce: at most one read is in flight and later
/// callers observe the entry it produced.
#[derive(Debug)]
pub struct StyleCache {
    data_dir: DataDir,
    entry: Mutex<Option<CacheEntry>>,
}

impl StyleCache {
    pub fn new(data_dir: DataDir) -> Self {
        Self {
            data_dir,
            entry: Mutex::new(None),
        }
    }

    /// Header fragment for `doc_type`, from cache when fresh.
    ///
    /// An absent type normalizes to `"default"`. A missing or malformed
    /// per-type file, or one without a string `header-includes` field,
    /// caches the empty string.
    pub async fn header_css(&self, doc_type: Option<&str>) -> String {
        let doc_type = doc_type.unwrap_or(DEFAULT_DOC_TYPE);

        let mut entry = self.entry.lock().await;
        if let Some(cached) = entry.as_ref() {
            if cached.doc_type == doc_type {
                return cached.header_css.clone();
            }
        }

        let file_name = format!("{}.toml", doc_type);
        let (outcome, _path) = self.data_dir.read(&file_name).await;
        let header_css = outcome
            .into_meta()
            .and_then(|meta| {
                meta.get(HEADER_INCLUDES_KEY)
                    .and_then(Value::as_str)
                    .map(|field| strip_style_tags(field).to_string())
            })
            .unwrap_or_default();

        *entry = Some(CacheEntry {
            doc_type: doc_type.to_string(),
            header_css: header_css.clone(),
        });
        header_css
    }
}

/// Remove a surrounding `<style>` element from a header fragment.
///
/// Fragments written for HTML embedding carry the wrapper; the composer
/// needs the bare rules. Anything not wrapped exactly passes through.
pub fn strip_style_tags(fragment: &str) -> &str {
    fragment
        .strip_prefix("<style>\n")
        .and_then(|rest| rest.strip_suffix("\n</style>"))
        .unwrap_or(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_style_tags_wrapped() {
        assert_eq!(
            strip_style_tags("<style>\nh1 { color: red; }\n</style>"),
            "h1 { color: red; }"
        );
    }

    #[test]
    fn test_strip_style_tags_unwrapped_passes_through() {
        assert_eq!(strip_style_tags("h1 { color: red; }"), "h1 { color: red; }");
    }

    #[test]
    fn test_strip_style_tags_requires_both_ends() {
        assert_eq!(strip_style_tags("<style>\nh1 {}"), "<style>\nh1 {}");
        assert_eq!(strip_style_tags("h1 {}\n</style>"), "h1 {}\n</style>");
    }

    #[test]
    fn test_strip_style_tags_requires_newlines() {
        assert_eq!(strip_style_tags("<style>h1 {}</style>"), "<style>h1 {}</style>");
    }
}
