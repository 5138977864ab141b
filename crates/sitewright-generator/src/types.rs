//! Request and result types for generation

use serde::{Deserialize, Serialize};
use sitewright_domain::{ContentId, StyleHints, WebsiteContent};

/// A request to generate a website
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Free-form description of the site
    pub prompt: String,

    /// Hints computed by the caller; extracted from the prompt when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_hints: Option<StyleHints>,
}

impl GenerationRequest {
    /// Request with hints left to extraction
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            style_hints: None,
        }
    }

    /// Supply hints explicitly
    pub fn with_hints(mut self, hints: StyleHints) -> Self {
        self.style_hints = Some(hints);
        self
    }
}

/// Outcome of a successful generation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    /// Id the document was saved under
    pub id: ContentId,

    /// The validated document
    pub content: WebsiteContent,

    /// Hints that steered the model
    pub hints: StyleHints,

    /// Whether the document came from degraded recovery
    pub recovered: bool,
}
