//! Tool-specific error types.

use thiserror::Error;

/// Errors raised while checking tool arguments, before any API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// The arguments did not deserialize into the tool's parameters.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A field deserialized but violates a constraint.
    #[error("{field} {reason}")]
    Validation { field: String, reason: String },
}

impl ToolError {
    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new validation error for `field`.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Text returned to the MCP client.
    pub fn user_message(&self) -> String {
        format!("Error: {self}")
    }
}
