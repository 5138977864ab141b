//! Sitewright Validator
//!
//! Enforces the structural invariants of a candidate document before it is
//! allowed anywhere near storage.
//!
//! The validator checks:
//! - `title` and `description` are non-empty strings
//! - `sections` is a non-empty array
//! - every section has a non-empty `type` and `heading`
//! - collection payloads (`items`, `testimonials`, `plans`) are arrays
//! - theme colours are `#RRGGBB` hex (advisory unless configured strict)
//!
//! # Examples
//!
//! ```
//! use sitewright_validator::ContentValidator;
//! use serde_json::json;
//!
//! let validator = ContentValidator::default_config();
//!
//! let content = validator.validate(&json!({
//!     "title": "Bean There",
//!     "description": "Neighbourhood coffee",
//!     "sections": [{"type": "hero", "heading": "Coffee, done right"}]
//! })).unwrap();
//! assert_eq!(content.sections[0].kind(), "hero");
//!
//! assert!(validator.validate(&json!({"title": "T", "description": "D", "sections": []})).is_err());
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod validator;

pub use config::ValidationConfig;
pub use error::{RejectionReason, ValidationError};
pub use validator::{is_hex_color, ContentValidator};
