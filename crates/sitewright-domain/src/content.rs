//! Website content - the document a generation request produces

use crate::id::ContentId;
use crate::lenient::{lenient_object, lenient_opt_string};
use crate::section::WebsiteSection;
use serde::{Deserialize, Serialize};

/// Visual theme for a generated site
///
/// Fields missing from a model response are filled from
/// [`ThemeSettings::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ThemeRecord")]
pub struct ThemeSettings {
    /// Primary brand colour as a `#RRGGBB` hex string
    pub primary_color: String,

    /// Secondary colour as a `#RRGGBB` hex string
    pub secondary_color: String,

    /// Font family name
    pub font_family: String,

    /// Design style label (e.g. "modern", "playful")
    pub style: String,
}

impl Default for ThemeSettings {
    /// Neutral theme used when a model response carried none
    fn default() -> Self {
        Self {
            primary_color: "#000000".to_string(),
            secondary_color: "#FFFFFF".to_string(),
            font_family: "sans-serif".to_string(),
            style: "default".to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeRecord {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    primary_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    secondary_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    font_family: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    style: Option<String>,
}

impl From<ThemeRecord> for ThemeSettings {
    fn from(record: ThemeRecord) -> Self {
        let defaults = ThemeSettings::default();
        Self {
            primary_color: record.primary_color.unwrap_or(defaults.primary_color),
            secondary_color: record.secondary_color.unwrap_or(defaults.secondary_color),
            font_family: record.font_family.unwrap_or(defaults.font_family),
            style: record.style.unwrap_or(defaults.style),
        }
    }
}

/// A complete, renderable website document
///
/// Built once per request and never mutated after validation. Validated
/// instances always have at least one section, and every section has a
/// non-empty `type` and `heading`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebsiteContent {
    /// Site title
    pub title: String,

    /// Meta description / value proposition
    pub description: String,

    /// Optional visual theme; a non-object value is treated as absent
    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeSettings>,

    /// Ordered page sections
    pub sections: Vec<WebsiteSection>,
}

/// A document as held by a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    /// Id the document was saved under
    pub id: ContentId,

    /// The document itself
    pub content: WebsiteContent,

    /// Save time (milliseconds since the Unix epoch)
    pub saved_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_theme_wire_names() {
        let json = serde_json::to_value(ThemeSettings::default()).unwrap();
        assert_eq!(json["primaryColor"], "#000000");
        assert_eq!(json["secondaryColor"], "#FFFFFF");
        assert_eq!(json["fontFamily"], "sans-serif");
        assert_eq!(json["style"], "default");
    }

    #[test]
    fn test_content_round_trip_preserves_sections() {
        let raw = json!({
            "title": "Bean There",
            "description": "Neighbourhood coffee",
            "theme": {
                "primaryColor": "#6f4e37",
                "secondaryColor": "#f5e6d3",
                "fontFamily": "Nunito",
                "style": "warm"
            },
            "sections": [
                {"type": "hero", "heading": "Coffee, done right"},
                {"type": "faq", "heading": "Questions"}
            ]
        });

        let content: WebsiteContent = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(content.sections.len(), 2);
        assert_eq!(content.sections[0].kind(), "hero");
        assert_eq!(serde_json::to_value(&content).unwrap(), raw);
    }

    #[test]
    fn test_theme_is_optional() {
        let content: WebsiteContent = serde_json::from_value(json!({
            "title": "T",
            "description": "D",
            "sections": [{"type": "about", "heading": "H"}]
        }))
        .unwrap();
        assert!(content.theme.is_none());
    }

    #[test]
    fn test_partial_theme_filled_from_defaults() {
        let content: WebsiteContent = serde_json::from_value(json!({
            "title": "T",
            "description": "D",
            "theme": {"primaryColor": "#112233"},
            "sections": [{"type": "hero", "heading": "H"}]
        }))
        .unwrap();

        let theme = content.theme.unwrap();
        assert_eq!(theme.primary_color, "#112233");
        assert_eq!(theme.secondary_color, "#FFFFFF");
        assert_eq!(theme.font_family, "sans-serif");
        assert_eq!(theme.style, "default");
    }

    #[test]
    fn test_non_object_theme_dropped() {
        let content: WebsiteContent = serde_json::from_value(json!({
            "title": "T",
            "description": "D",
            "theme": "modern",
            "sections": [{"type": "hero", "heading": "H"}]
        }))
        .unwrap();
        assert!(content.theme.is_none());
    }
}
