//! Model endpoint configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default inference endpoint
pub const DEFAULT_ENDPOINT: &str = "https://models.github.ai/inference";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "deepseek/DeepSeek-V3-0324";

/// Endpoint, credential and sampling parameters for the remote model
#[derive(Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Base URL; requests go to `<endpoint>/chat/completions`
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier sent in every request body
    #[serde(default = "default_model")]
    pub model: String,

    /// Bearer credential
    #[serde(default)]
    pub token: Option<String>,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Nucleus sampling mass
    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// Completion token cap
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-request timeout; unset means the HTTP client's default
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f64 {
    0.8
}

fn default_top_p() -> f64 {
    1.0
}

fn default_max_tokens() -> u32 {
    4096
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            token: None,
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_tokens: default_max_tokens(),
            request_timeout_secs: None,
        }
    }
}

impl ModelConfig {
    /// Whether a non-blank credential is present
    pub fn has_token(&self) -> bool {
        self.token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty())
    }

    /// The request timeout as a Duration, if configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Full chat-completions URL
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
    }
}

// Keeps the credential out of logs.
impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("max_tokens", &self.max_tokens)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ModelConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.temperature, 0.8);
        assert_eq!(config.top_p, 1.0);
        assert_eq!(config.max_tokens, 4096);
        assert!(config.request_timeout().is_none());
        assert!(!config.has_token());
    }

    #[test]
    fn test_completions_url_trims_slash() {
        let config = ModelConfig {
            endpoint: "http://localhost:9000/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.completions_url(), "http://localhost:9000/chat/completions");
    }

    #[test]
    fn test_blank_token_is_missing() {
        let config = ModelConfig {
            token: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!config.has_token());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ModelConfig {
            token: Some("ghp_secret".to_string()),
            ..Default::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("ghp_secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ModelConfig =
            serde_json::from_str(r#"{"model": "gpt-4o-mini", "max_tokens": 2048}"#).unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, 2048);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }
}
