//! Runtime configuration
//!
//! Configuration is resolved from these sources, later sources overriding
//! earlier ones:
//!
//! 1. Built-in defaults
//! 2. A TOML file, when one is given
//! 3. Environment variables (`VERCEL_API_URL`, `RELAY_TIMEOUT_MS`)
//! 4. Command-line flags
//!
//! Sources 3 and 4 are read by the binary and applied with
//! [`RelayConfig::with_overrides`].
//!
//! # Example file
//!
//! ```toml
//! api_url = "https://relay.example.com"
//! timeout_ms = 3000
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_API_URL, DEFAULT_TIMEOUT_MS};
use crate::{Error, Result};

/// Settings for reaching the coordination service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Base URL of the coordination service
    pub api_url: String,
    /// Timeout for each forwarded request, in milliseconds
    pub timeout_ms: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl RelayConfig {
    /// Load configuration from an optional TOML file on top of the defaults.
    ///
    /// The result is not validated; call [`RelayConfig::validate`] once all
    /// overrides have been applied.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        let config: RelayConfig = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Apply values from the environment or command line
    pub fn with_overrides(mut self, api_url: Option<String>, timeout_ms: Option<u64>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(ms) = timeout_ms {
            self.timeout_ms = ms;
        }
        self
    }

    /// Check every field, collecting all problems.
    ///
    /// On success the API URL is normalised (surrounding whitespace and
    /// trailing slashes removed).
    pub fn validate(mut self) -> Result<Self> {
        let mut problems = Vec::new();

        self.api_url = self.api_url.trim().trim_end_matches('/').to_string();
        if self.api_url.is_empty() {
            problems.push("api_url must not be empty".to_string());
        } else {
            match reqwest::Url::parse(&self.api_url) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                Ok(url) => problems.push(format!(
                    "api_url must use http or https (got '{}')",
                    url.scheme()
                )),
                Err(e) => problems.push(format!("api_url '{}' is invalid: {}", self.api_url, e)),
            }
        }

        if self.timeout_ms == 0 {
            problems.push("timeout_ms must be greater than 0".to_string());
        }

        if problems.is_empty() {
            Ok(self)
        } else {
            Err(Error::InvalidConfig { problems })
        }
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.api_url, "https://relay_devfest.vercel.app");
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn load_without_file_uses_defaults() {
        assert_eq!(RelayConfig::load(None).unwrap(), RelayConfig::default());
    }

    #[test]
    fn load_partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("relay.toml");
        fs::write(&path, "api_url = \"http://localhost:3000\"\n").unwrap();

        let config = RelayConfig::load(Some(&path)).unwrap();
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.timeout_ms, 5000);
    }

    #[test]
    fn load_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let err = RelayConfig::load(Some(&temp.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn load_malformed_file_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("relay.toml");
        fs::write(&path, "timeout_ms = \"soon\"\n").unwrap();

        let err = RelayConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, Error::TomlDe(_)));
    }

    #[test]
    fn overrides_win_over_file() {
        let config = RelayConfig::default()
            .with_overrides(Some("http://127.0.0.1:9999".into()), None)
            .with_overrides(None, Some(250));
        assert_eq!(config.api_url, "http://127.0.0.1:9999");
        assert_eq!(config.timeout_ms, 250);
    }

    #[test]
    fn validate_strips_trailing_slash() {
        let config = RelayConfig::default()
            .with_overrides(Some(" https://relay.example.com/ ".into()), None)
            .validate()
            .unwrap();
        assert_eq!(config.api_url, "https://relay.example.com");
    }

    #[rstest]
    #[case("", 5000, 1)]
    #[case("not a url", 5000, 1)]
    #[case("ftp://relay.example.com", 5000, 1)]
    #[case("https://relay.example.com", 0, 1)]
    #[case("", 0, 2)]
    fn validate_reports_all_problems(
        #[case] url: &str,
        #[case] timeout_ms: u64,
        #[case] expected: usize,
    ) {
        let err = RelayConfig {
            api_url: url.to_string(),
            timeout_ms,
        }
        .validate()
        .unwrap_err();
        match err {
            Error::InvalidConfig { problems } => assert_eq!(problems.len(), expected),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }
}
