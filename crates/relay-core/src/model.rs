//! Response shapes of the coordination service
//!
//! These types mirror what the service returns. Relay deserializes them to
//! check the shape, then re-serializes them unchanged. Optional fields
//! serialize as `null` rather than being dropped, so callers always see the
//! full record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Instruction the coordination service gives to an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrchestrationAction {
    Pull,
    Push,
    Wait,
    SwitchTask,
    Stop,
    Proceed,
}

/// Discriminator carried by every orchestration command.
///
/// Only one value exists; it is kept so the record is self-describing on
/// the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CommandKind {
    #[default]
    #[serde(rename = "orchestration_command")]
    OrchestrationCommand,
}

/// An orchestration instruction, passed through unchanged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationCommand {
    #[serde(rename = "type", default)]
    pub kind: CommandKind,
    pub action: OrchestrationAction,
    #[serde(default)]
    pub command: Option<String>,
    pub reason: String,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl OrchestrationCommand {
    /// Create a command with only an action and a reason
    pub fn new(action: OrchestrationAction, reason: impl Into<String>) -> Self {
        Self {
            kind: CommandKind::OrchestrationCommand,
            action,
            command: None,
            reason: reason.into(),
            metadata: None,
        }
    }
}

/// Whether a lock holder is reading or writing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LockStatus {
    Reading,
    Writing,
}

/// Whether a lock was taken on the file itself or on a dependency of it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LockType {
    Direct,
    Neighbor,
}

/// A lock held on one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockEntry {
    pub user: String,
    pub status: LockStatus,
    pub lock_type: LockType,
    /// Seconds since the Unix epoch
    pub timestamp: f64,
    #[serde(default)]
    pub message: Option<String>,
}

/// Overall state of the requested files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepoStatus {
    Ok,
    Stale,
    Conflict,
    Offline,
}

/// Result of `check_status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckStatusResponse {
    pub status: RepoStatus,
    pub repo_head: String,
    pub locks: BTreeMap<String, LockEntry>,
    pub warnings: Vec<String>,
    #[serde(default)]
    pub orchestration: Option<OrchestrationCommand>,
}

impl CheckStatusResponse {
    /// Response returned when the coordination service cannot be reached
    pub fn offline() -> Self {
        Self {
            status: RepoStatus::Offline,
            repo_head: "unknown".to_string(),
            locks: BTreeMap::new(),
            warnings: vec!["OFFLINE_MODE: Vercel Unreachable".to_string()],
            orchestration: Some(OrchestrationCommand::new(
                OrchestrationAction::SwitchTask,
                "System Offline",
            )),
        }
    }
}

/// Result of `post_status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostStatusResponse {
    pub success: bool,
    #[serde(default)]
    pub orphaned_dependencies: Vec<String>,
    #[serde(default)]
    pub orchestration: Option<OrchestrationCommand>,
}

impl PostStatusResponse {
    fn rejected(action: OrchestrationAction, reason: impl Into<String>) -> Self {
        Self {
            success: false,
            orphaned_dependencies: Vec::new(),
            orchestration: Some(OrchestrationCommand::new(action, reason)),
        }
    }

    /// Response returned when the coordination service cannot be reached
    pub fn offline() -> Self {
        Self::rejected(
            OrchestrationAction::Stop,
            "Vercel Offline - Cannot Acquire Lock",
        )
    }

    /// Response returned when another user holds a lock on a requested file
    pub fn conflict() -> Self {
        Self::rejected(
            OrchestrationAction::Wait,
            "Conflict: File locked by another user",
        )
    }

    /// Response returned for any other failure while forwarding the update
    pub fn failed(error: &impl std::fmt::Display) -> Self {
        Self::rejected(OrchestrationAction::Stop, format!("Error: {}", error))
    }
}
