//! Registrar error types and the user-facing error classifier.
//!
//! Every failure the client can produce is one of two kinds: an application
//! error reported by the Reg.ru API (always a code/text pair), or a transport
//! failure (network, timeout, non-2xx status, undecodable body).
//! [`RegistrarError::user_message`] turns either into the text returned to the
//! calling agent.

use std::fmt;

use thiserror::Error;

/// A specialized Result type for registrar operations.
pub type RegistrarResult<T> = std::result::Result<T, RegistrarError>;

/// Code used when the API reports an error without an `error_code`.
pub const UNKNOWN_ERROR_CODE: &str = "UNKNOWN_ERROR";

/// Text used when the API reports an error without an `error_text`.
pub const UNKNOWN_ERROR_TEXT: &str = "Unknown error";

const CONNECT_MESSAGE: &str = "Error: Cannot connect to Reg.ru API. Check your internet connection.";
const TIMEOUT_MESSAGE: &str = "Error: Request to Reg.ru API timed out. Try again.";

/// Application-level error reported by the Reg.ru API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Machine-readable error code (e.g. `DOMAIN_NOT_FOUND`).
    pub code: String,
    /// Human-readable text supplied by the API.
    pub text: String,
}

impl ApiError {
    /// Build an error from the optional code/text pair of an API envelope.
    pub fn from_parts(code: Option<&str>, text: Option<&str>) -> Self {
        Self {
            code: code.unwrap_or(UNKNOWN_ERROR_CODE).to_string(),
            text: text.unwrap_or(UNKNOWN_ERROR_TEXT).to_string(),
        }
    }

    /// Render the error for the end user.
    ///
    /// Recognized codes get actionable guidance; anything else is shown
    /// verbatim with its code.
    pub fn user_message(&self) -> String {
        match actionable_message(&self.code) {
            Some(message) => format!("Error: {message}"),
            None => format!("Error from Reg.ru API: [{}] {}", self.code, self.text),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.text)
    }
}

/// Guidance for the API error codes worth explaining to a user.
fn actionable_message(code: &str) -> Option<&'static str> {
    let message = match code {
        "AUTH_ERROR" => {
            "Authentication failed. Check that REGRU_USERNAME and REGRU_PASSWORD environment variables are correct."
        }
        "DOMAIN_NOT_FOUND" => {
            "Domain not found in your Reg.ru account. Verify domain ownership and spelling."
        }
        "INVALID_DOMAIN_NAME" => {
            "Invalid domain name format. Provide a valid domain like 'example.com'."
        }
        "RECORD_ALREADY_EXISTS" => {
            "This DNS record already exists. Remove the existing record first or use a different subdomain/value."
        }
        "ACCESS_DENIED" => {
            "Access denied. Your Reg.ru account may lack API permissions. Enable API access in account settings."
        }
        "INVALID_IP_ADDRESS" => {
            "Invalid IP address format. Provide a valid IPv4 (e.g., 1.2.3.4) or IPv6 address."
        }
        "TOO_MANY_REQUESTS" => {
            "Rate limit exceeded (max 1200 requests/hour). Wait a moment and try again."
        }
        "DOMAIN_BAD_NAME" => {
            "Bad domain name. Check the domain format — it should be like 'example.com'."
        }
        "NO_DOMAIN" => "No domain specified. Provide a domain name.",
        "SERVICE_UNAVAILABLE" => {
            "Reg.ru API is temporarily unavailable. Try again in a few minutes."
        }
        _ => return None,
    };
    Some(message)
}

/// Broad category of a transport failure, used to pick the user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// The API host could not be reached.
    Connect,
    /// The request did not complete within the timeout.
    Timeout,
    /// Any other failure (HTTP status, malformed body, ...).
    Other,
}

impl TransportKind {
    /// Classify a failure from its textual description.
    pub fn classify(description: &str) -> Self {
        if description.contains("ECONNREFUSED") || description.contains("ENOTFOUND") {
            Self::Connect
        } else if description.contains("ETIMEDOUT") || description.contains("timeout") {
            Self::Timeout
        } else {
            Self::Other
        }
    }
}

/// A failure below the API application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub kind: TransportKind,
    pub message: String,
}

impl TransportFailure {
    /// Create a failure, classifying it from the message text.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: TransportKind::classify(&message),
            message,
        }
    }

    /// Create a failure with an explicit kind.
    pub fn with_kind(kind: TransportKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Render the failure for the end user.
    pub fn user_message(&self) -> String {
        match self.kind {
            TransportKind::Connect => CONNECT_MESSAGE.to_string(),
            TransportKind::Timeout => TIMEOUT_MESSAGE.to_string(),
            TransportKind::Other => format!("Error: {}", self.message),
        }
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        let kind = if err.is_timeout() {
            TransportKind::Timeout
        } else if err.is_connect() {
            TransportKind::Connect
        } else {
            TransportKind::classify(&message)
        };
        Self { kind, message }
    }
}

/// Errors surfaced by the registrar client.
#[derive(Debug, Error)]
pub enum RegistrarError {
    /// The API answered with `result = "error"` at the envelope or domain level.
    #[error("Reg.ru API error {0}")]
    Api(ApiError),

    /// The request never produced a usable API answer.
    #[error("Transport error: {0}")]
    Transport(TransportFailure),
}

impl RegistrarError {
    /// Create an API error from an envelope's optional code/text fields.
    pub fn api(code: Option<&str>, text: Option<&str>) -> Self {
        Self::Api(ApiError::from_parts(code, text))
    }

    /// Create a transport error classified from its message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(TransportFailure::new(message))
    }

    /// The API error code, if this is an application error.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api(err) => Some(&err.code),
            Self::Transport(_) => None,
        }
    }

    /// Text suitable for returning to the MCP client.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            Self::Transport(failure) => failure.user_message(),
        }
    }
}

impl From<reqwest::Error> for RegistrarError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.into())
    }
}
