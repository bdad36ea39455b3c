//! Tools domain module.
//!
//! Tools are the only MCP capability this server offers. Each one validates
//! its arguments, makes a single Reg.ru API call and renders the result.
//!
//! ## Architecture
//!
//! - `definitions/` - parameter structs, the generic runner, validation and formatting
//! - `router.rs` - ToolRouter builder used by the server
//! - `registry.rs` - list of every tool and its metadata
//! - `error.rs` - argument validation errors
//!
//! ## Adding a New Tool
//!
//! 1. Add a parameter struct implementing `ZoneOperation` in `definitions/`
//! 2. Add a `ZoneTool<...>` alias in `definitions/mod.rs`
//! 3. Add its route in `router.rs` and its entries in `registry.rs`

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
