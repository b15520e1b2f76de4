//! MCP Tool Handlers
//!
//! This module implements the handlers for MCP tool calls, delegating to
//! [`RelayService`] for validation, forwarding and fallbacks.

use relay_core::request::default_branch;
use relay_core::{CheckStatusRequest, LockIntent, PostStatusRequest, RelayService};
use serde::Deserialize;
use serde_json::Value;

use crate::tools::{CHECK_STATUS, POST_STATUS};
use crate::{Error, Result};

/// Handle a tool call by dispatching to the appropriate handler
pub async fn handle_tool_call(
    service: &RelayService,
    tool_name: &str,
    arguments: Value,
) -> Result<Value> {
    match tool_name {
        CHECK_STATUS => handle_check_status(service, arguments).await,
        POST_STATUS => handle_post_status(service, arguments).await,
        _ => Err(Error::UnknownTool(tool_name.to_string())),
    }
}

/// Arguments for check_status
#[derive(Debug, Deserialize)]
struct CheckStatusArgs {
    username: String,
    file_paths: Vec<String>,
    agent_head: String,
    repo_url: String,
    #[serde(default = "default_branch")]
    branch: String,
}

/// Handle check_status - Check status of files before editing
async fn handle_check_status(service: &RelayService, arguments: Value) -> Result<Value> {
    let args: CheckStatusArgs =
        serde_json::from_value(arguments).map_err(|e| Error::InvalidArgument(e.to_string()))?;

    let request = CheckStatusRequest::new(args.file_paths, args.agent_head, args.repo_url)
        .with_branch(args.branch);
    let response = service.check_status(&args.username, request).await?;

    Ok(serde_json::to_value(response)?)
}

/// Arguments for post_status
#[derive(Debug, Deserialize)]
struct PostStatusArgs {
    username: String,
    file_paths: Vec<String>,
    status: String,
    message: String,
    agent_head: String,
    repo_url: String,
    #[serde(default = "default_branch")]
    branch: String,
    #[serde(default)]
    new_repo_head: Option<String>,
}

/// Handle post_status - Update lock status for files
async fn handle_post_status(service: &RelayService, arguments: Value) -> Result<Value> {
    let args: PostStatusArgs =
        serde_json::from_value(arguments).map_err(|e| Error::InvalidArgument(e.to_string()))?;

    let status: LockIntent = args.status.parse()?;
    let mut request = PostStatusRequest::new(
        args.file_paths,
        status,
        args.message,
        args.agent_head,
        args.repo_url,
    )
    .with_branch(args.branch);
    if let Some(head) = args.new_repo_head {
        request = request.with_new_repo_head(head);
    }

    let response = service.post_status(&args.username, request).await?;

    Ok(serde_json::to_value(response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::{HttpCoordinationClient, RelayConfig};
    use relay_test_utils::unreachable_url;
    use serde_json::json;
    use std::sync::Arc;

    fn offline_service() -> RelayService {
        let config = RelayConfig {
            api_url: unreachable_url(),
            timeout_ms: 500,
        };
        RelayService::new(Arc::new(HttpCoordinationClient::new(&config).unwrap()))
    }

    #[tokio::test]
    async fn unknown_tool_is_rejected() {
        let err = handle_tool_call(&offline_service(), "delete_repo", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnknownTool(ref name) if name == "delete_repo"));
    }

    #[tokio::test]
    async fn missing_arguments_are_invalid() {
        let err = handle_tool_call(&offline_service(), CHECK_STATUS, Value::Null)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let err = handle_tool_call(
            &offline_service(),
            CHECK_STATUS,
            json!({"username": "octocat", "file_paths": ["a.rs"], "agent_head": "abc"}),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("repo_url"), "got: {err}");
    }

    #[tokio::test]
    async fn unknown_lock_status_is_invalid() {
        let err = handle_tool_call(
            &offline_service(),
            POST_STATUS,
            json!({
                "username": "octocat",
                "file_paths": ["a.rs"],
                "status": "LOCKED",
                "message": "",
                "agent_head": "abc",
                "repo_url": "repo"
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Core(relay_core::Error::InvalidRequest { .. })));
    }

    #[tokio::test]
    async fn offline_check_status_returns_fallback() {
        let result = handle_tool_call(
            &offline_service(),
            CHECK_STATUS,
            json!({
                "username": "octocat",
                "file_paths": ["src/auth.ts"],
                "agent_head": "abc",
                "repo_url": "https://github.com/acme/app"
            }),
        )
        .await
        .unwrap();
        assert_eq!(result["status"], "OFFLINE");
        assert_eq!(result["orchestration"]["action"], "SWITCH_TASK");
    }

    #[tokio::test]
    async fn offline_post_status_returns_stop() {
        let result = handle_tool_call(
            &offline_service(),
            POST_STATUS,
            json!({
                "username": "octocat",
                "file_paths": ["src/auth.ts"],
                "status": "writing",
                "message": "refactoring",
                "agent_head": "abc",
                "repo_url": "https://github.com/acme/app"
            }),
        )
        .await
        .unwrap();
        assert_eq!(result["success"], false);
        assert_eq!(result["orchestration"]["action"], "STOP");
        assert_eq!(
            result["orchestration"]["reason"],
            "Vercel Offline - Cannot Acquire Lock"
        );
    }
}
