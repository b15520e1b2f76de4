//! MCP Server for Relay
//!
//! This crate exposes Relay's file-lock coordination via the Model Context
//! Protocol (MCP), so coding agents can ask whether files are safe to edit
//! and announce the locks they take.
//!
//! # Architecture
//!
//! ```text
//! [ MCP Client (agent / IDE) ]
//!        | (JSON-RPC over stdio)
//!        v
//! [ relay-mcp (MCP Server) ]
//!        | (Rust API)
//!        v
//! [ relay-core (validation + fallbacks) ]
//!        | (HTTPS)
//!        v
//! [ coordination service ]
//! ```
//!
//! # Tools
//!
//! - `check_status` - Check status of files before editing
//! - `post_status` - Update lock status for files

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;

pub use error::{Error, Result};
pub use handlers::handle_tool_call;
pub use server::RelayMcpServer;
pub use tools::{ToolContent, ToolDefinition, ToolResult, get_tool_definitions};
