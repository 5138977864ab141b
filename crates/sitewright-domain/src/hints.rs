//! Style hints derived from a prompt

use serde::{Deserialize, Serialize};

/// Heuristic industry/style/colour signals used to steer generation.
///
/// Derived per request and never persisted on its own. Every field is
/// optional; an empty value means no rule matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleHints {
    /// Matched industry tag (e.g. "coffee", "tech")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,

    /// Matched style tag (e.g. "modern", "minimal")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    /// Named colours, in the order they appeared in the prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_preferences: Option<Vec<String>>,
}

impl StyleHints {
    /// True when no hint field carries a value
    pub fn is_empty(&self) -> bool {
        self.industry.is_none()
            && self.style.is_none()
            && self
                .color_preferences
                .as_ref()
                .map_or(true, |colors| colors.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(StyleHints::default().is_empty());
    }

    #[test]
    fn test_empty_color_list_counts_as_empty() {
        let hints = StyleHints {
            color_preferences: Some(vec![]),
            ..Default::default()
        };
        assert!(hints.is_empty());
    }

    #[test]
    fn test_camel_case_wire_format() {
        let hints = StyleHints {
            industry: Some("coffee".to_string()),
            style: None,
            color_preferences: Some(vec!["red".to_string(), "gold".to_string()]),
        };

        let json = serde_json::to_value(&hints).unwrap();
        assert_eq!(json["industry"], "coffee");
        assert_eq!(json["colorPreferences"][1], "gold");
        assert!(json.get("style").is_none());
    }

    #[test]
    fn test_deserialize_partial() {
        let hints: StyleHints = serde_json::from_str(r#"{"style": "retro"}"#).unwrap();
        assert_eq!(hints.style.as_deref(), Some("retro"));
        assert!(hints.industry.is_none());
    }
}
