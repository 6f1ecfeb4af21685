//! Sandboxed access to the application's private data directory
//!
//! Every configuration file the engine touches lives in one private
//! directory. Caller-supplied file names are reduced to their final path
//! component before resolution, so no input can reach outside the
//! directory, whatever `..`, roots or separators it carries.

use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::warn;

use crate::error::{Result, StylelabError};
use crate::meta::Meta;

/// Directory name under the platform config dir holding all user data
pub const DATA_DIR_NAME: &str = "StylelabUserData";

/// Handle to the private configuration directory
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

/// Result of reading one configuration file.
///
/// `Missing` is the expected first-run case and is distinct from
/// `Malformed`, so callers can fall back to defaults while still knowing
/// whether the file was broken rather than merely absent.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    /// File parsed to a top-level mapping
    Parsed(Meta),
    /// File does not exist
    Missing,
    /// File exists but could not be read or parsed
    Malformed,
}

impl ReadOutcome {
    /// Collapse to the mapping-or-nothing view: a missing file reads as an
    /// empty mapping, a malformed one as `None`.
    pub fn into_meta(self) -> Option<Meta> {
        match self {
            ReadOutcome::Parsed(meta) => Some(meta),
            ReadOutcome::Missing => Some(Meta::new()),
            ReadOutcome::Malformed => None,
        }
    }
}

impl DataDir {
    /// Create a handle rooted at `root`. The directory itself is created
    /// lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The conventional per-user location, `<config_dir>/StylelabUserData`
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join(DATA_DIR_NAME)))
    }

    /// Root of the private directory
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Resolve a caller-supplied name to a path inside the directory.
    ///
    /// Only the final normal component of `name` is used; directory
    /// components, `..`, roots and drive prefixes are discarded.
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(sanitize_file_name(name))
    }

    /// Read and parse one configuration file.
    ///
    /// Returns the outcome together with the resolved path. A missing file
    /// is silent; unreadable or unparseable content logs a diagnostic.
    pub async fn read(&self, name: &str) -> (ReadOutcome, PathBuf) {
        let path = self.resolve(name);

        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return (ReadOutcome::Missing, path);
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read data dir file");
                return (ReadOutcome::Malformed, path);
            }
        };

        match toml::from_str::<Meta>(&raw) {
            Ok(meta) => (ReadOutcome::Parsed(meta), path),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to parse data dir file");
                (ReadOutcome::Malformed, path)
            }
        }
    }

    /// Serialize `content` into one configuration file.
    ///
    /// Creates the directory recursively on first write. The file is
    /// written to a temporary sibling and persisted over the target, so a
    /// failed write never corrupts a previously valid file.
    pub async fn write(&self, name: &str, content: &Meta) -> Result<PathBuf> {
        let path = self.resolve(name);

        fs::create_dir_all(&self.root).await.map_err(|err| {
            StylelabError::DataDirWriteError(format!(
                "failed to create '{}': {}",
                self.root.display(),
                err
            ))
        })?;

        let raw = toml::to_string_pretty(content).map_err(|err| {
            StylelabError::DataDirSerializeError(format!(
                "failed to serialize '{}': {}",
                path.display(),
                err
            ))
        })?;

        atomic_write(raw, path.clone(), self.root.clone()).await?;
        Ok(path)
    }
}

/// Reduce a caller-supplied name to its final normal path component.
///
/// `"../settings.toml"`, `"/etc/settings.toml"` and `"a/b/settings.toml"`
/// all reduce to `"settings.toml"`. A name with no normal component (`".."`,
/// `"/"`, `""`) reduces to the empty string, which resolves to the directory
/// itself and fails any subsequent read as unreadable.
fn sanitize_file_name(name: &str) -> std::ffi::OsString {
    Path::new(name)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .last()
        .map(|part| part.to_os_string())
        .unwrap_or_default()
}

/// Write via NamedTempFile + persist in the same directory (Windows
/// compatible). The blocking tempfile API runs on the blocking pool.
async fn atomic_write(content: String, path: PathBuf, parent: PathBuf) -> Result<()> {
    let result = tokio::task::spawn_blocking(move || atomic_write_sync(&content, &path, &parent))
        .await
        .map_err(|err| {
            StylelabError::DataDirWriteError(format!("write task failed: {}", err))
        })?;

    result.map_err(|err| StylelabError::DataDirWriteError(format!("failed to write: {}", err)))
}

fn atomic_write_sync(content: &str, path: &Path, parent: &Path) -> std::io::Result<()> {
    use std::io::Write;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|err| err.error)?;
    Ok(())
}
