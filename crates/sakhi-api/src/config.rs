//! Configuration file parsing for the API server
//!
//! Loads settings from TOML files including bind address, JWT secret,
//! database path, and the verification oracle endpoint.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// API configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),
}

/// API server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    pub bind_port: u16,

    /// JWT secret for signing session tokens
    pub jwt_secret: String,

    /// Token expiry in seconds (default: 3600 = 1 hour)
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: u64,

    /// SQLite database path
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Verification oracle settings
    #[serde(default)]
    pub oracle: OracleConfig,
}

/// Verification oracle configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    /// Ollama endpoint (e.g., "http://localhost:11434")
    #[serde(default = "default_oracle_endpoint")]
    pub endpoint: String,

    /// Model to use for verification
    #[serde(default = "default_oracle_model")]
    pub model: String,

    /// Maximum retry attempts per oracle call
    #[serde(default = "default_oracle_retries")]
    pub max_retries: u32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: default_oracle_endpoint(),
            model: default_oracle_model(),
            max_retries: default_oracle_retries(),
        }
    }
}

/// Default token expiry: 1 hour
fn default_token_expiry() -> u64 {
    3600
}

fn default_database_path() -> String {
    "sakhi.db".to_string()
}

fn default_oracle_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_oracle_model() -> String {
    "llama3".to_string()
}

fn default_oracle_retries() -> u32 {
    3
}

impl ApiConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ApiConfig = toml::from_str(&contents)?;

        // Validate required fields
        if config.jwt_secret.is_empty() {
            return Err(ConfigError::MissingField("jwt_secret".to_string()));
        }

        Ok(config)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ApiConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            jwt_secret: "test-secret-key-do-not-use-in-production".to_string(),
            token_expiry_secs: 3600,
            database_path: ":memory:".to_string(),
            oracle: OracleConfig::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
