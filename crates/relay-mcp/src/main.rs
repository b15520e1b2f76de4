//! Relay MCP Server
//!
//! A Model Context Protocol server that lets coding agents coordinate file
//! locks through the Relay coordination service.
//!
//! # Usage
//!
//! ```bash
//! relay-mcp [--config <path>] [--api-url <url>] [--timeout-ms <ms>]
//! ```
//!
//! # Environment Variables
//!
//! Variables may also be set in a `.env` file in the working directory or
//! one of its parents; the real environment takes precedence.
//!
//! - `VERCEL_API_URL`: Base URL of the coordination service
//! - `RELAY_TIMEOUT_MS`: Per-request timeout in milliseconds (default: 5000)
//! - `RUST_LOG`: Control log verbosity (default: `relay_mcp=info,relay_core=info`)
//!
//! # Protocol
//!
//! The server communicates via JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdout
//! - Logs go to stderr (to avoid interfering with the protocol)

use std::path::PathBuf;

use clap::Parser;
use relay_core::RelayConfig;
use relay_mcp::RelayMcpServer;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "relay_mcp=info,relay_core=info";

/// MCP server for Relay file coordination
#[derive(Parser)]
#[command(name = "relay-mcp")]
#[command(about = "MCP server for Relay file coordination")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Coordination service base URL
    #[arg(long, env = "VERCEL_API_URL")]
    api_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, env = "RELAY_TIMEOUT_MS")]
    timeout_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Values already in the environment win over `.env`
    let dotenv_path = dotenvy::dotenv().ok();

    // Initialize logging to stderr (stdout is reserved for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = dotenv_path {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    let args = Args::parse();

    let config = RelayConfig::load(args.config.as_deref())?
        .with_overrides(args.api_url, args.timeout_ms)
        .validate()?;

    tracing::info!(api_url = %config.api_url, "Starting relay-mcp server");

    let mut server = RelayMcpServer::from_config(&config)?;
    server.run().await?;

    Ok(())
}
