//! Configuration for the Generator

use serde::{Deserialize, Serialize};
use sitewright_validator::ValidationConfig;

/// Configuration for the Generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Maximum prompt length (characters)
    #[serde(default = "default_max_prompt_length")]
    pub max_prompt_length: usize,

    /// Validation rules applied to every candidate
    #[serde(default)]
    pub validation: ValidationConfig,
}

fn default_max_prompt_length() -> usize {
    4_000
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_prompt_length: default_max_prompt_length(),
            validation: ValidationConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_prompt_length == 0 {
            return Err("max_prompt_length must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}
