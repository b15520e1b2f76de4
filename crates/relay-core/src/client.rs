//! Coordination service client
//!
//! [`CoordinationApi`] is the seam between Relay and the external service.
//! [`HttpCoordinationClient`] is the production implementation: one JSON
//! `POST` per call, a single timeout, no retries.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::AuthenticatedUser;
use crate::config::RelayConfig;
use crate::constants::{USERNAME_HEADER, api_path};
use crate::model::{CheckStatusResponse, PostStatusResponse};
use crate::request::{CheckStatusRequest, PostStatusRequest};
use crate::{Error, Result};

/// Operations offered by the coordination service
#[async_trait]
pub trait CoordinationApi: Send + Sync {
    /// Query lock state for a set of files
    async fn check_status(
        &self,
        user: &AuthenticatedUser,
        request: &CheckStatusRequest,
    ) -> Result<CheckStatusResponse>;

    /// Update lock state for a set of files
    async fn post_status(
        &self,
        user: &AuthenticatedUser,
        request: &PostStatusRequest,
    ) -> Result<PostStatusResponse>;
}

/// HTTP client for the coordination service
#[derive(Debug, Clone)]
pub struct HttpCoordinationClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCoordinationClient {
    /// Create a client from validated configuration
    pub fn new(config: &RelayConfig) -> Result<Self> {
        // A 3xx is reported as a status error, never followed.
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B, T>(&self, path: &str, user: &AuthenticatedUser, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, user = %user.login, "Forwarding request");

        let response = self
            .http
            .post(&url)
            .header(USERNAME_HEADER, &user.login)
            .json(body)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            return Err(Error::Conflict);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(classify)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Separate "service is offline" from other transport failures
fn classify(err: reqwest::Error) -> Error {
    if err.is_connect() || err.is_timeout() {
        Error::Unreachable { source: err }
    } else {
        Error::Http(err)
    }
}

#[async_trait]
impl CoordinationApi for HttpCoordinationClient {
    async fn check_status(
        &self,
        user: &AuthenticatedUser,
        request: &CheckStatusRequest,
    ) -> Result<CheckStatusResponse> {
        self.post_json(api_path::CHECK_STATUS, user, request).await
    }

    async fn post_status(
        &self,
        user: &AuthenticatedUser,
        request: &PostStatusRequest,
    ) -> Result<PostStatusResponse> {
        self.post_json(api_path::POST_STATUS, user, request).await
    }
}
