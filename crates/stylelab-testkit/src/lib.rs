//! Test utilities for stylelab
//!
//! This crate provides shared testing utilities used across the stylelab
//! workspace, mainly a temporary stand-in for the private data directory.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary data directory fixture.
///
/// Creates an isolated directory for one test and removes it on drop, so
/// tests never touch the real per-user configuration directory and cannot
/// interfere with each other.
///
/// # Examples
///
/// ```rust
/// use stylelab_testkit::TempDataDir;
///
/// let fixture = TempDataDir::new();
/// fixture.write_file("settings.toml", "auto_update_app = false\n");
/// assert!(fixture.path().join("settings.toml").exists());
/// // Cleanup happens automatically when fixture is dropped.
/// ```
pub struct TempDataDir {
    dir: TempDir,
}

impl TempDataDir {
    /// Create a fresh empty fixture directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temporary data directory"),
        }
    }

    /// Root of the fixture directory
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file with the given contents into the fixture directory.
    ///
    /// Returns the path of the written file.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents)
            .unwrap_or_else(|e| panic!("Failed to write fixture file '{}': {}", name, e));
        path
    }

    /// Read a file from the fixture directory.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be read.
    pub fn read_file(&self, name: &str) -> String {
        let path = self.dir.path().join(name);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read fixture file '{}': {}", name, e))
    }

    /// A path inside the fixture that does not exist yet, for testing
    /// directory creation.
    pub fn missing_subdir(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

impl Default for TempDataDir {
    fn default() -> Self {
        Self::new()
    }
}
