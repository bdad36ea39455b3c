//! MCP Server Entry Point
//!
//! Loads configuration, initializes logging, and serves the Reg.ru tools over
//! stdio.

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use regru_mcp_server::core::config::{PASSWORD_VAR, USERNAME_VAR};
use regru_mcp_server::core::{Config, McpServer, StdioTransport};
use regru_mcp_server::domains::tools::ToolRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    // Missing credentials are fatal before anything else starts
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {e}");
            eprintln!("Set {USERNAME_VAR} and {PASSWORD_VAR} in the environment or in a .env file.");
            std::process::exit(1);
        }
    };

    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    let server = McpServer::new(config)?;

    info!(
        "Server initialized with {} tools",
        ToolRegistry::tool_names().len()
    );

    StdioTransport::run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout carries the MCP protocol.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
