//! Caller identity
//!
//! Relay trusts the username the caller supplies. It is only checked for
//! being usable as an HTTP header value, which means visible ASCII.

use crate::{Error, Result};

/// The user on whose behalf a request is forwarded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub login: String,
    pub name: String,
    pub email: String,
}

impl AuthenticatedUser {
    /// Build a user from a caller-supplied username
    pub fn from_username(username: &str) -> Result<Self> {
        let login = username.trim();
        if login.is_empty() {
            return Err(Error::InvalidUsername {
                reason: "username must not be empty".to_string(),
            });
        }
        if let Some(ch) = login
            .chars()
            .find(|c| c.is_whitespace() || c.is_control() || !c.is_ascii())
        {
            return Err(Error::InvalidUsername {
                reason: format!("username contains invalid character {:?}", ch),
            });
        }

        Ok(Self {
            login: login.to_string(),
            name: "Unknown".to_string(),
            email: "unknown@example.com".to_string(),
        })
    }
}
