//! Reg.ru DNS MCP Server Library
//!
//! Exposes DNS-zone management of domains registered at Reg.ru as Model
//! Context Protocol tools.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and the stdio transport
//! - **domains**: business logic organized by bounded contexts
//!   - **registrar**: Reg.ru API client, form encoding and error classification
//!   - **tools**: MCP tools built on the registrar client
//!
//! # Example
//!
//! ```rust,no_run
//! use regru_mcp_server::core::{Config, McpServer, StdioTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config)?;
//!     StdioTransport::run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Error, McpServer, Result};
