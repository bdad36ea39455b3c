//! Domains module containing business logic organized by bounded contexts.
//!
//! - `registrar`: the Reg.ru API client and its wire format
//! - `tools`: the MCP tools built on top of it

pub mod registrar;
pub mod tools;
