//! Application settings persisted in the data directory
//!
//! Loading never fails: each field is validated on its own, and a field
//! that is absent or of the wrong shape falls back to its hardcoded default
//! without discarding valid siblings.

use serde::{Deserialize, Serialize};
use toml::Value;
use tracing::warn;

use crate::datadir::DataDir;
use crate::meta::Meta;

/// File name of the settings record inside the data directory
pub const SETTINGS_FILE: &str = "settings.toml";

/// Application settings record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub auto_update_app: bool,
    pub auto_hide_title_bar: bool,
    pub editor_font: String,
    pub editor_font_size: u32,
    pub global_css: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_update_app: true,
            auto_hide_title_bar: false,
            editor_font: "monospace".to_string(),
            editor_font_size: 14,
            global_css: String::new(),
        }
    }
}

impl Settings {
    /// Load settings from the data directory.
    ///
    /// Always returns a fully populated record. Missing and malformed files
    /// both yield all defaults; a malformed file has already been logged by
    /// the store.
    pub async fn load(data_dir: &DataDir) -> Settings {
        let (outcome, _path) = data_dir.read(SETTINGS_FILE).await;
        let meta = outcome.into_meta().unwrap_or_default();
        Settings::from_meta(&meta)
    }

    /// Build a record from a raw mapping, field by field.
    pub fn from_meta(meta: &Meta) -> Settings {
        let defaults = Settings::default();
        Settings {
            auto_update_app: bool_field(meta, "auto_update_app")
                .unwrap_or(defaults.auto_update_app),
            auto_hide_title_bar: bool_field(meta, "auto_hide_title_bar")
                .unwrap_or(defaults.auto_hide_title_bar),
            editor_font: string_field(meta, "editor_font").unwrap_or(defaults.editor_font),
            editor_font_size: size_field(meta, "editor_font_size")
                .unwrap_or(defaults.editor_font_size),
            global_css: string_field(meta, "global_css").unwrap_or(defaults.global_css),
        }
    }

    /// Persist the full record, best-effort.
    ///
    /// A write failure is logged and swallowed; the in-memory record stays
    /// authoritative.
    pub async fn save(&self, data_dir: &DataDir) {
        let meta = match self.to_meta() {
            Some(meta) => meta,
            None => {
                warn!("failed to serialize settings");
                return;
            }
        };
        if let Err(err) = data_dir.write(SETTINGS_FILE, &meta).await {
            warn!(error = %err, "failed to persist settings");
        }
    }

    fn to_meta(&self) -> Option<Meta> {
        match Value::try_from(self.clone()) {
            Ok(Value::Table(table)) => Some(table),
            _ => None,
        }
    }
}

fn bool_field(meta: &Meta, key: &str) -> Option<bool> {
    meta.get(key).and_then(Value::as_bool)
}

fn string_field(meta: &Meta, key: &str) -> Option<String> {
    meta.get(key).and_then(Value::as_str).map(str::to_string)
}

fn size_field(meta: &Meta, key: &str) -> Option<u32> {
    meta.get(key)
        .and_then(Value::as_integer)
        .and_then(|size| u32::try_from(size).ok())
}
