//! Configuration file parsing for the server.
//!
//! Loads the bind address, model endpoint, retry policy, storage and
//! generator settings from TOML, then applies environment overrides.

use serde::Deserialize;
use sitewright_generator::GeneratorConfig;
use sitewright_llm::{ModelConfig, RetryPolicy};
use sitewright_store::{StorageConfig, StorageMode};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Server configuration error
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

    /// Field present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 3000)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Remote model settings
    #[serde(default)]
    pub model: ModelConfig,

    /// Retry policy for model calls
    #[serde(default)]
    pub retry: RetryPolicy,

    /// Where and how documents are stored
    #[serde(default)]
    pub storage: StorageConfig,

    /// Pipeline limits
    #[serde(default)]
    pub generator: GeneratorConfig,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            model: ModelConfig::default(),
            retry: RetryPolicy::default(),
            storage: StorageConfig::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values a file can get wrong
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingField("model.endpoint".to_string()));
        }
        if self.model.model.trim().is_empty() {
            return Err(ConfigError::MissingField("model.model".to_string()));
        }
        if self.storage.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("storage.path".to_string()));
        }
        self.generator.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }

    /// Apply `MODEL_ENDPOINT`, `MODEL_NAME` and `GITHUB_TOKEN` from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`; blank values are ignored
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(endpoint) = get("MODEL_ENDPOINT") {
            self.model.endpoint = endpoint;
        }
        if let Some(model) = get("MODEL_NAME") {
            self.model.model = model;
        }
        if let Some(token) = get("GITHUB_TOKEN") {
            self.model.token = Some(token);
        }
    }

    /// Override the bind address from an `address:port` string
    pub fn set_bind(&mut self, bind: &str) -> Result<(), ConfigError> {
        let (address, port) = bind
            .rsplit_once(':')
            .ok_or_else(|| ConfigError::Invalid(format!("bind '{}' is not address:port", bind)))?;
        self.bind_port = port
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("bind port '{}' is not a number", port)))?;
        self.bind_address = address.to_string();
        Ok(())
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 0,
            model: ModelConfig {
                token: Some("test-token".to_string()),
                ..ModelConfig::default()
            },
            retry: RetryPolicy::no_retry(),
            storage: StorageConfig {
                path: PathBuf::from(":memory:"),
                mode: StorageMode::SingleSlot,
            },
            generator: GeneratorConfig::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
