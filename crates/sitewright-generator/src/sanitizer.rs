//! Turn raw model text into a candidate document

use crate::error::SanitizeError;
use regex::Regex;
use serde_json::{json, Value};
use sitewright_domain::ThemeSettings;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Title used when none could be recovered
pub const FALLBACK_TITLE: &str = "Untitled Website";

/// Description used when none could be recovered
pub const FALLBACK_DESCRIPTION: &str = "Description not available";

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```")
        .unwrap_or_else(|err| panic!("fenced block regex: {err}"))
});

/// Scalar fields degraded recovery looks for
const RECOVERABLE_FIELDS: &[&str] = &[
    "title",
    "description",
    "primaryColor",
    "secondaryColor",
    "fontFamily",
    "style",
];

static FIELD_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    RECOVERABLE_FIELDS
        .iter()
        .map(|field| {
            let pattern = format!(r#""{}"\s*:\s*"([^"]*)""#, regex::escape(field));
            let regex = Regex::new(&pattern)
                .unwrap_or_else(|err| panic!("field regex for {field}: {err}"));
            (*field, regex)
        })
        .collect()
});

/// A candidate document and how it was obtained
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizeOutcome {
    /// The parsed (or recovered) document, not yet validated
    pub candidate: Value,

    /// True when strict parsing failed and the fallback was built
    pub recovered: bool,
}

/// Inner text of the first fenced code block holding a JSON object
pub fn extract_fenced_block(raw: &str) -> Option<&str> {
    FENCED_BLOCK
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Remove `//` line comments and `/* */` block comments outside strings
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                // Keep the newline so line structure survives
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Remove commas that directly precede `]` or `}` outside strings
pub fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if matches!(next, Some(']') | Some('}')) {
                continue;
            }
        }
        out.push(c);
    }

    out
}

fn capture_field<'a>(text: &'a str, field: &str) -> Option<&'a str> {
    let (_, regex) = FIELD_PATTERNS.iter().find(|(name, _)| *name == field)?;
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|value| !value.is_empty())
}

/// Build the minimal fallback document from whatever scalars can be found
///
/// Only `title`, `description` and the four theme fields are recovered.
/// Sections are never recovered; a single placeholder section stands in.
pub fn recover_fallback(text: &str) -> Value {
    let mut theme = ThemeSettings::default();
    let mut recovered_theme = false;

    for (field, slot) in [
        ("primaryColor", &mut theme.primary_color),
        ("secondaryColor", &mut theme.secondary_color),
        ("fontFamily", &mut theme.font_family),
        ("style", &mut theme.style),
    ] {
        if let Some(value) = capture_field(text, field) {
            *slot = value.to_string();
            recovered_theme = true;
        }
    }

    let title = capture_field(text, "title");
    let description = capture_field(text, "description");
    debug!(
        title = title.is_some(),
        description = description.is_some(),
        theme = recovered_theme,
        "Degraded recovery results"
    );

    json!({
        "title": title.unwrap_or(FALLBACK_TITLE),
        "description": description.unwrap_or(FALLBACK_DESCRIPTION),
        "theme": {
            "primaryColor": theme.primary_color,
            "secondaryColor": theme.secondary_color,
            "fontFamily": theme.font_family,
            "style": theme.style,
        },
        "sections": [{
            "type": "placeholder",
            "layout": "default",
            "heading": "Content not available",
            "subheading": "Please provide more details",
            "cta": "Learn More",
        }],
    })
}

/// Turn raw model output into a candidate document
///
/// Steps, in order: take the first fenced block if there is one, strip
/// comments and trailing commas, parse strictly, and fall back to degraded
/// recovery when parsing fails. Only text that is empty after cleaning is
/// an error.
pub fn sanitize(raw: &str) -> Result<SanitizeOutcome, SanitizeError> {
    let body = match extract_fenced_block(raw) {
        Some(block) => {
            debug!("Extracted JSON from fenced code block");
            block
        }
        None => raw,
    };

    let cleaned = strip_trailing_commas(&strip_comments(body));
    if cleaned.trim().is_empty() {
        return Err(SanitizeError::Parse {
            raw: raw.to_string(),
        });
    }

    match serde_json::from_str::<Value>(&cleaned) {
        Ok(candidate) => Ok(SanitizeOutcome {
            candidate,
            recovered: false,
        }),
        Err(err) => {
            warn!(error = %err, "Model output is not valid JSON, using degraded recovery");
            Ok(SanitizeOutcome {
                candidate: recover_fallback(&cleaned),
                recovered: true,
            })
        }
    }
}
