//! MCP Server implementation and lifecycle management.
//!
//! The server only exposes tools. Each tool is a thin adapter around one
//! registrar operation; the router is built in `domains/tools/router.rs`
//! from a shared [`RegistrarApi`] handle.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use crate::domains::registrar::{RegistrarApi, RegruClient};
use crate::domains::tools::build_tool_router;

const INSTRUCTIONS: &str = "Manages DNS zones of domains registered at Reg.ru. \
Use regru_get_dns_records to inspect a zone before changing it. Single-record tools \
add or remove one record; regru_update_records applies up to 50 ordered add/remove \
actions in one call; regru_update_soa changes zone TTL defaults; regru_clear_zone \
deletes every record in the zone and cannot be undone.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a server talking to the Reg.ru API configured in `config`.
    pub fn new(config: Config) -> super::Result<Self> {
        let client = RegruClient::with_base_url(
            config.credentials.clone(),
            config.api.base_url.clone(),
        )?;
        info!("Reg.ru client ready for {}", client.base_url());
        Ok(Self::with_registrar(config, Arc::new(client)))
    }

    /// Create a server backed by an arbitrary registrar implementation.
    pub fn with_registrar(config: Config, registrar: Arc<dyn RegistrarApi>) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(registrar),
            config: Arc::new(config),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Names of the tools this server answers to.
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect()
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
