//! Document validation logic

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use sitewright_domain::WebsiteContent;
use tracing::{debug, warn};

use crate::{RejectionReason, ValidationConfig, ValidationError};

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap_or_else(|err| panic!("hex colour regex: {err}"))
});

/// Section kinds whose payload must be an array, and the field holding it
const COLLECTION_FIELDS: &[(&str, &str)] = &[
    ("features", "items"),
    ("gallery", "items"),
    ("testimonials", "testimonials"),
    ("pricing", "plans"),
];

const THEME_COLOR_FIELDS: &[&str] = &["primaryColor", "secondaryColor"];

/// Whether `value` is a `#RRGGBB` colour
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

/// Validates candidate documents before they are accepted
#[derive(Debug, Clone, Default)]
pub struct ContentValidator {
    config: ValidationConfig,
}

impl ContentValidator {
    /// Create a validator with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a validator with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Check a candidate and convert it into a typed document
    ///
    /// All structural problems are collected before returning, so the error
    /// lists every reason the candidate was rejected.
    pub fn validate(&self, candidate: &Value) -> Result<WebsiteContent, ValidationError> {
        let Some(object) = candidate.as_object() else {
            return Err(ValidationError::new(vec![RejectionReason::NotAnObject]));
        };

        let mut reasons = Vec::new();

        if !is_non_empty_string(object.get("title")) {
            reasons.push(RejectionReason::MissingTitle);
        }
        if !is_non_empty_string(object.get("description")) {
            reasons.push(RejectionReason::MissingDescription);
        }

        match object.get("sections").and_then(Value::as_array) {
            None => reasons.push(RejectionReason::SectionsNotArray),
            Some(sections) if sections.is_empty() => reasons.push(RejectionReason::NoSections),
            Some(sections) => {
                for (index, section) in sections.iter().enumerate() {
                    self.check_section(index, section, &mut reasons);
                }
            }
        }

        self.check_theme(object, &mut reasons);

        if !reasons.is_empty() {
            debug!(count = reasons.len(), "Candidate rejected");
            return Err(ValidationError::new(reasons));
        }

        serde_json::from_value(candidate.clone()).map_err(|err| {
            ValidationError::new(vec![RejectionReason::Malformed(err.to_string())])
        })
    }

    fn check_section(&self, index: usize, section: &Value, reasons: &mut Vec<RejectionReason>) {
        let Some(section) = section.as_object() else {
            reasons.push(RejectionReason::SectionNotObject { index });
            return;
        };

        let kind = section.get("type").and_then(Value::as_str).unwrap_or("");
        if kind.trim().is_empty() {
            reasons.push(RejectionReason::MissingSectionType { index });
        }
        if !is_non_empty_string(section.get("heading")) {
            reasons.push(RejectionReason::MissingHeading { index });
        }

        for (collection_kind, field) in COLLECTION_FIELDS {
            if kind != *collection_kind {
                continue;
            }
            // null is treated as absent
            if let Some(value) = section.get(*field) {
                if !value.is_null() && !value.is_array() {
                    reasons.push(RejectionReason::CollectionNotArray {
                        index,
                        kind: kind.to_string(),
                        field: field.to_string(),
                    });
                }
            }
        }
    }

    fn check_theme(&self, object: &Map<String, Value>, reasons: &mut Vec<RejectionReason>) {
        let Some(theme) = object.get("theme").and_then(Value::as_object) else {
            return;
        };

        for field in THEME_COLOR_FIELDS {
            let Some(value) = theme.get(*field).and_then(Value::as_str) else {
                continue;
            };
            if is_hex_color(value) {
                continue;
            }
            if self.config.strict_colors {
                reasons.push(RejectionReason::InvalidColor {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            } else {
                warn!(field = *field, value, "Theme colour is not #RRGGBB");
            }
        }
    }
}

fn is_non_empty_string(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|text| !text.trim().is_empty())
}
