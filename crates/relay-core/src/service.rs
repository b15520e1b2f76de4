//! Request validation and outcome mapping
//!
//! [`RelayService`] is the only place that decides what a caller sees when
//! the coordination service misbehaves:
//!
//! | outcome | `check_status` | `post_status` |
//! |---------|----------------|---------------|
//! | success | payload as returned | payload as returned |
//! | unreachable | [`CheckStatusResponse::offline`] | [`PostStatusResponse::offline`] |
//! | 409 | error | [`PostStatusResponse::conflict`] |
//! | anything else | error | [`PostStatusResponse::failed`] |
//!
//! Invalid arguments are always returned as errors.

use std::sync::Arc;

use crate::auth::AuthenticatedUser;
use crate::client::CoordinationApi;
use crate::model::{CheckStatusResponse, PostStatusResponse};
use crate::request::{CheckStatusRequest, PostStatusRequest};
use crate::{Error, Result};

/// Forwards status calls and applies the fallback policy
#[derive(Clone)]
pub struct RelayService {
    api: Arc<dyn CoordinationApi>,
}

impl RelayService {
    pub fn new(api: Arc<dyn CoordinationApi>) -> Self {
        Self { api }
    }

    /// Check the status of files before editing them
    pub async fn check_status(
        &self,
        username: &str,
        request: CheckStatusRequest,
    ) -> Result<CheckStatusResponse> {
        let user = AuthenticatedUser::from_username(username)?;
        request.validate()?;

        match self.api.check_status(&user, &request).await {
            Ok(response) => {
                tracing::info!(
                    user = %user.login,
                    files = request.file_paths.len(),
                    status = ?response.status,
                    "check_status completed"
                );
                Ok(response)
            }
            Err(e) if e.is_unreachable() => {
                tracing::warn!(user = %user.login, error = %e, "Coordination service offline");
                Ok(CheckStatusResponse::offline())
            }
            Err(e) => {
                tracing::error!(user = %user.login, error = %e, "check_status failed");
                Err(e)
            }
        }
    }

    /// Update the lock status of files
    pub async fn post_status(
        &self,
        username: &str,
        request: PostStatusRequest,
    ) -> Result<PostStatusResponse> {
        let user = AuthenticatedUser::from_username(username)?;
        request.validate()?;

        let response = match self.api.post_status(&user, &request).await {
            Ok(response) => response,
            Err(Error::Conflict) => {
                tracing::info!(user = %user.login, "Lock conflict reported by service");
                PostStatusResponse::conflict()
            }
            Err(e) if e.is_unreachable() => {
                tracing::warn!(user = %user.login, error = %e, "Coordination service offline");
                PostStatusResponse::offline()
            }
            Err(e) => {
                tracing::error!(user = %user.login, error = %e, "post_status failed");
                PostStatusResponse::failed(&e)
            }
        };

        tracing::info!(
            user = %user.login,
            files = request.file_paths.len(),
            status = %request.status,
            success = response.success,
            "post_status completed"
        );
        Ok(response)
    }
}

impl std::fmt::Debug for RelayService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayService").finish_non_exhaustive()
    }
}
