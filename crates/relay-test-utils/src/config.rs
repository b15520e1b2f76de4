//! Temporary configuration files.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A `relay.toml` written into a temporary directory.
///
/// The directory is removed when the value is dropped, so keep it alive for
/// as long as the path is in use.
pub struct TestConfigFile {
    temp_dir: TempDir,
}

impl TestConfigFile {
    /// Write `contents` to `relay.toml` in a fresh temporary directory.
    ///
    /// # Panics
    /// Panics if the filesystem operations fail.
    pub fn new(contents: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("relay.toml"), contents)
            .unwrap_or_else(|e| panic!("TestConfigFile: failed to write relay.toml: {e}"));
        Self { temp_dir }
    }

    /// Write a file pointing the client at `api_url` with the given timeout.
    pub fn pointing_at(api_url: &str, timeout_ms: u64) -> Self {
        Self::new(&format!(
            "api_url = \"{api_url}\"\ntimeout_ms = {timeout_ms}\n"
        ))
    }

    /// Path of the written file.
    pub fn path(&self) -> PathBuf {
        self.temp_dir.path().join("relay.toml")
    }
}
