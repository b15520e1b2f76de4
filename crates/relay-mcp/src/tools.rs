//! MCP Tool definitions
//!
//! Tools are the only way agents interact with Relay.
//!
//! ## File Coordination
//! - `check_status` - Check status of files before editing; returns locks,
//!   warnings and an orchestration command
//! - `post_status` - Take or release READING/WRITING locks on files

use serde::{Deserialize, Serialize};
use serde_json::json;

/// Name of the status query tool
pub const CHECK_STATUS: &str = "check_status";

/// Name of the status update tool
pub const POST_STATUS: &str = "post_status";

/// Tool definition for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Result from a tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

/// Content types for tool results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolResult {
    /// Create a successful text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: content.into(),
            }],
            is_error: None,
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: Some(true),
        }
    }
}

/// Get all available tool definitions
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: CHECK_STATUS.to_string(),
            description: "Check status of files before editing. Returns orchestration commands."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "username": {
                        "type": "string",
                        "description": "GitHub username (required until OAuth is available)"
                    },
                    "file_paths": {
                        "type": "array",
                        "items": { "type": "string" },
                        "minItems": 1,
                        "description": "List of file paths (e.g., [\"src/auth.ts\", \"src/db.ts\"])"
                    },
                    "agent_head": {
                        "type": "string",
                        "description": "Current git HEAD SHA"
                    },
                    "repo_url": {
                        "type": "string",
                        "description": "Repository URL"
                    },
                    "branch": {
                        "type": "string",
                        "description": "Git branch name",
                        "default": "main"
                    }
                },
                "required": ["username", "file_paths", "agent_head", "repo_url"]
            }),
        },
        ToolDefinition {
            name: POST_STATUS.to_string(),
            description: "Update lock status for files. Supports atomic multi-file locking."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "username": {
                        "type": "string",
                        "description": "GitHub username (required until OAuth is available)"
                    },
                    "file_paths": {
                        "type": "array",
                        "items": { "type": "string" },
                        "minItems": 1,
                        "description": "List of file paths (e.g., [\"src/auth.ts\"])"
                    },
                    "status": {
                        "type": "string",
                        "enum": ["READING", "WRITING", "OPEN"],
                        "description": "Lock status (matched case-insensitively)"
                    },
                    "message": {
                        "type": "string",
                        "description": "Context message about what you're doing"
                    },
                    "agent_head": {
                        "type": "string",
                        "description": "Current git HEAD SHA"
                    },
                    "repo_url": {
                        "type": "string",
                        "description": "Repository URL"
                    },
                    "branch": {
                        "type": "string",
                        "description": "Git branch name",
                        "default": "main"
                    },
                    "new_repo_head": {
                        "type": "string",
                        "description": "New HEAD SHA after push (required for OPEN status)"
                    }
                },
                "required": ["username", "file_paths", "status", "message", "agent_head", "repo_url"]
            }),
        },
    ]
}
