//! Validation error types

use thiserror::Error;

/// Why a candidate document was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// The candidate is not a JSON object
    #[error("content is not a JSON object")]
    NotAnObject,

    /// `title` is missing, blank, or not a string
    #[error("title is missing or empty")]
    MissingTitle,

    /// `description` is missing, blank, or not a string
    #[error("description is missing or empty")]
    MissingDescription,

    /// `sections` is missing or not an array
    #[error("sections is missing or not an array")]
    SectionsNotArray,

    /// `sections` is an empty array
    #[error("sections is empty")]
    NoSections,

    /// A section is not an object
    #[error("section {index} is not an object")]
    SectionNotObject {
        /// Position in `sections`
        index: usize,
    },

    /// A section lacks a non-empty `type`
    #[error("section {index} is missing a type")]
    MissingSectionType {
        /// Position in `sections`
        index: usize,
    },

    /// A section lacks a non-empty `heading`
    #[error("section {index} is missing a heading")]
    MissingHeading {
        /// Position in `sections`
        index: usize,
    },

    /// A collection field holds something other than an array
    #[error("{kind} section {index} has a non-array '{field}'")]
    CollectionNotArray {
        /// Position in `sections`
        index: usize,
        /// Section type
        kind: String,
        /// Offending field
        field: String,
    },

    /// A theme colour is not `#RRGGBB` (strict mode only)
    #[error("theme.{field} '{value}' is not a #RRGGBB colour")]
    InvalidColor {
        /// Theme field name
        field: String,
        /// Value found
        value: String,
    },

    /// The structure passed but a payload could not be typed
    #[error("malformed content: {0}")]
    Malformed(String),
}

/// A rejected candidate and every reason it was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("content rejected: {}", summarize(.reasons))]
pub struct ValidationError {
    /// All reasons found, in check order
    pub reasons: Vec<RejectionReason>,
}

impl ValidationError {
    /// Wrap a list of reasons
    pub fn new(reasons: Vec<RejectionReason>) -> Self {
        Self { reasons }
    }
}

fn summarize(reasons: &[RejectionReason]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
