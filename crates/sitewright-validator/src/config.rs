//! Validator configuration

use serde::{Deserialize, Serialize};

/// Configuration for validation rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Reject non-hex theme colours instead of only logging them
    #[serde(default)]
    pub strict_colors: bool,
}

impl ValidationConfig {
    /// Create a strict configuration (colour format is enforced)
    pub fn strict() -> Self {
        Self {
            strict_colors: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_colors_are_advisory() {
        assert!(!ValidationConfig::default().strict_colors);
        assert!(ValidationConfig::strict().strict_colors);
    }
}
