//! Configuration management for the MCP server.
//!
//! Everything is read from the process environment once at startup (a `.env`
//! file in the working directory is honored). The Reg.ru account credentials
//! are mandatory; all other settings have defaults.

use tracing::info;

use super::error::{Error, Result};
use crate::domains::registrar::DEFAULT_BASE_URL;

/// Environment variable holding the Reg.ru account login.
pub const USERNAME_VAR: &str = "REGRU_USERNAME";

/// Environment variable holding the Reg.ru account password.
pub const PASSWORD_VAR: &str = "REGRU_PASSWORD";

/// Optional override of the API base URL.
pub const API_URL_VAR: &str = "REGRU_API_URL";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Registrar API endpoint.
    pub api: ApiConfig,

    /// Reg.ru account credentials.
    pub credentials: Credentials,
}

/// Server identification configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
}

/// Reg.ru account credentials, sent with every API request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "regru-mcp-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Create a configuration with default settings for the given account.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            api: ApiConfig::default(),
            credentials,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Fails when `REGRU_USERNAME` or `REGRU_PASSWORD` is unset or empty.
    /// `MCP_SERVER_NAME`, `MCP_LOG_LEVEL` and `REGRU_API_URL` are optional.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let username = non_empty_var(USERNAME_VAR);
        let password = non_empty_var(PASSWORD_VAR);
        let credentials = match (username, password) {
            (Some(username), Some(password)) => Credentials::new(username, password),
            _ => {
                return Err(Error::config(format!(
                    "{USERNAME_VAR} and {PASSWORD_VAR} environment variables are required"
                )));
            }
        };

        let mut config = Self::new(credentials);

        if let Some(name) = non_empty_var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = non_empty_var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(url) = non_empty_var(API_URL_VAR) {
            config.api.base_url = url.trim_end_matches('/').to_string();
            info!("Using Reg.ru API at {}", config.api.base_url);
        }

        Ok(config)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        unsafe {
            std::env::remove_var(USERNAME_VAR);
            std::env::remove_var(PASSWORD_VAR);
            std::env::remove_var(API_URL_VAR);
            std::env::remove_var("MCP_SERVER_NAME");
        }
    }

    #[test]
    fn test_credentials_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var(USERNAME_VAR, "test_user");
            std::env::set_var(PASSWORD_VAR, "test_pass");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.credentials, Credentials::new("test_user", "test_pass"));
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.server.name, "regru-mcp-server");
        clear_env();
    }

    #[test]
    fn test_missing_password_is_rejected() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var(USERNAME_VAR, "test_user");
        }
        let err = Config::from_env().unwrap_err();
        let message = err.to_string();
        assert!(message.contains(USERNAME_VAR));
        assert!(message.contains(PASSWORD_VAR));
        clear_env();
    }

    #[test]
    fn test_empty_username_is_rejected() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var(USERNAME_VAR, "");
            std::env::set_var(PASSWORD_VAR, "test_pass");
        }
        assert!(matches!(Config::from_env(), Err(Error::Config(_))));
        clear_env();
    }

    #[test]
    fn test_api_url_override_is_trimmed() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var(USERNAME_VAR, "test_user");
            std::env::set_var(PASSWORD_VAR, "test_pass");
            std::env::set_var(API_URL_VAR, "http://localhost:9000/api/regru2/");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9000/api/regru2");
        clear_env();
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let config = Config::new(Credentials::new("alice", "super_secret_pass"));
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("REDACTED"));
        assert!(debug_str.contains("alice"));
        assert!(!debug_str.contains("super_secret_pass"));
    }
}
