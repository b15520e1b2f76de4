//! Error types for relay-core

use std::path::PathBuf;

/// Result type for relay-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in relay-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Tool arguments failed local validation
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Caller-supplied username cannot be used as an identity
    #[error("Invalid username: {reason}")]
    InvalidUsername { reason: String },

    /// Configuration failed validation
    #[error("Invalid configuration: {}", problems.join(", "))]
    InvalidConfig { problems: Vec<String> },

    /// Configuration file not found at the given path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Coordination service could not be reached (connection refused or timed out)
    #[error("Coordination service unreachable: {source}")]
    Unreachable {
        #[source]
        source: reqwest::Error,
    },

    /// Coordination service rejected the update because another user holds the lock
    #[error("Conflict: file locked by another user")]
    Conflict,

    /// Coordination service answered with an unexpected status code
    #[error("Coordination service returned {status}: {body}")]
    Status { status: u16, body: String },

    // Transparent wrappers for underlying crate errors
    /// HTTP client error other than connect/timeout
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    /// Shorthand for [`Error::InvalidRequest`]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Error::InvalidRequest {
            message: message.into(),
        }
    }

    /// Whether the failure means the service is offline rather than misbehaving
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Error::Unreachable { .. })
    }
}
