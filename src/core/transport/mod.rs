//! Transport layer for the MCP server.
//!
//! The server speaks JSON-RPC over standard input/output only. Standard output
//! carries protocol messages exclusively; logs go to standard error.

mod error;
pub mod stdio;

pub use error::{TransportError, TransportResult};
pub use stdio::StdioTransport;
