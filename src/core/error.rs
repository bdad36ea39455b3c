//! Error types and handling for the MCP server.
//!
//! Errors here only concern startup and the server lifecycle. Failures inside
//! a tool call never escape as [`Error`]; they are rendered into the tool
//! result instead.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The registrar client could not be set up.
    #[error("Registrar error: {0}")]
    Registrar(#[from] crate::domains::registrar::RegistrarError),

    /// The MCP transport failed.
    #[error(transparent)]
    Transport(#[from] super::transport::TransportError),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
