//! MCP Server implementation
//!
//! The main server struct that coordinates MCP protocol handling
//! with the Relay service.

use std::sync::Arc;

use relay_core::{HttpCoordinationClient, RelayConfig, RelayService};
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::handlers::handle_tool_call;
use crate::protocol::{
    InitializeParams, InitializeResult, JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION,
    ServerCapabilities, ServerInfo, ToolCallParams, ToolsCapability, error_code,
};
use crate::tools::{ToolDefinition, ToolResult, get_tool_definitions};
use crate::{Error, Result};

/// MCP Server for Relay
///
/// This server exposes Relay's `check_status` and `post_status` tools via
/// the Model Context Protocol.
///
/// # Example
///
/// ```ignore
/// use relay_core::RelayConfig;
/// use relay_mcp::RelayMcpServer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = RelayConfig::default().validate()?;
///     let mut server = RelayMcpServer::from_config(&config)?;
///     server.run().await?;
///     Ok(())
/// }
/// ```
pub struct RelayMcpServer {
    /// Forwards tool calls to the coordination service
    service: RelayService,

    /// Whether the server has been initialized
    initialized: bool,

    /// Available MCP tools
    tools: Vec<ToolDefinition>,
}

impl RelayMcpServer {
    /// Create a new MCP server around an existing service
    pub fn new(service: RelayService) -> Self {
        Self {
            service,
            initialized: false,
            tools: Vec::new(),
        }
    }

    /// Create a server that talks to the coordination service over HTTP
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let client = HttpCoordinationClient::new(config)?;
        tracing::info!(
            api_url = %client.base_url(),
            timeout_ms = config.timeout_ms,
            "Coordination client ready"
        );
        Ok(Self::new(RelayService::new(Arc::new(client))))
    }

    /// Initialize the server
    ///
    /// Loads the tool definitions.
    pub async fn initialize(&mut self) -> Result<()> {
        tracing::info!("Initializing MCP server");

        self.tools = get_tool_definitions();
        self.initialized = true;
        Ok(())
    }

    /// Run the MCP server
    ///
    /// This starts the server and begins processing MCP protocol
    /// messages over stdin/stdout.
    pub async fn run(&mut self) -> Result<()> {
        self.initialize().await?;

        tracing::info!("MCP server ready, listening on stdio");

        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Process newline-delimited JSON-RPC messages until `reader` is exhausted
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            tracing::debug!(request = %line, "Received message");

            let response = match self.handle_message(line).await {
                Ok(response) => response,
                Err(e) => {
                    let error_response = JsonRpcResponse::error(
                        None,
                        error_code::INTERNAL_ERROR,
                        format!("Internal error: {}", e),
                    );
                    serde_json::to_string(&error_response)?
                }
            };

            // Notifications produce no response
            if response.is_empty() {
                continue;
            }

            writer.write_all(response.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        tracing::info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle a single MCP message
    ///
    /// Parses the JSON-RPC request and dispatches to the appropriate handler.
    ///
    /// # Arguments
    ///
    /// * `message` - The raw JSON-RPC message string
    ///
    /// # Returns
    ///
    /// The JSON-RPC response as a string, or empty string for notifications.
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let value: Value = match serde_json::from_str(message) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed JSON-RPC message");
                return encode(JsonRpcResponse::error(
                    None,
                    error_code::PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        let id = value.get("id").filter(|id| !id.is_null()).cloned();
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return encode(JsonRpcResponse::error(
                    id,
                    error_code::INVALID_REQUEST,
                    format!("Invalid Request: {}", e),
                ));
            }
        };
        if request.jsonrpc != "2.0" {
            return encode(JsonRpcResponse::error(
                request.id,
                error_code::INVALID_REQUEST,
                format!("Invalid Request: unsupported jsonrpc version '{}'", request.jsonrpc),
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id, request.params).await?,
            "initialized" => return Ok(String::new()),
            method if method.starts_with("notifications/") => return Ok(String::new()),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id).await?,
            "tools/call" => self.handle_tools_call(request.id, request.params).await?,
            // Unknown notifications are dropped without a reply
            _ if request.id.is_none() => {
                tracing::debug!(method = %request.method, "Ignoring unknown notification");
                return Ok(String::new());
            }
            _ => JsonRpcResponse::error(
                request.id,
                error_code::METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };

        encode(response)
    }

    /// Handle the initialize request
    ///
    /// Returns server capabilities and info.
    async fn handle_initialize(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        if let Ok(params) = serde_json::from_value::<InitializeParams>(params) {
            tracing::info!(
                client = %params.client_info.name,
                client_version = %params.client_info.version,
                protocol_version = %params.protocol_version,
                "Client connected"
            );
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: "relay-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    /// Handle tools/list request
    async fn handle_tools_list(&self, id: Option<Value>) -> Result<JsonRpcResponse> {
        let tools = get_tool_definitions();
        Ok(JsonRpcResponse::success(
            id,
            json!({ "tools": serde_json::to_value(tools)? }),
        ))
    }

    /// Handle tools/call request
    ///
    /// Executes the requested tool and returns the result. Tool failures are
    /// reported inside the result with `isError: true`.
    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let tool_params: ToolCallParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return Ok(JsonRpcResponse::error(
                    id,
                    error_code::INVALID_PARAMS,
                    format!("Invalid params: {}", e),
                ));
            }
        };

        let tool_result =
            match handle_tool_call(&self.service, &tool_params.name, tool_params.arguments).await
            {
                Ok(result) => ToolResult::text(serde_json::to_string_pretty(&result)?),
                Err(e) => {
                    tracing::warn!(tool = %tool_params.name, error = %e, "Tool call failed");
                    ToolResult::error(e.to_string())
                }
            };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(tool_result)?))
    }

    /// Check if the server is initialized
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Get available tools
    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }
}

fn encode(response: JsonRpcResponse) -> Result<String> {
    serde_json::to_string(&response).map_err(Error::from)
}
