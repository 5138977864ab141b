//! Sitewright Generator
//!
//! Turns a free-form prompt into a validated, stored website document.
//!
//! # Pipeline
//!
//! 1. **Hints**: keyword rules pull industry, style and colour signals from the prompt
//! 2. **Prompt**: the prompt plus a style-guidance suffix becomes the user message
//! 3. **Model**: a [`ModelProvider`](sitewright_llm::ModelProvider) returns raw text
//! 4. **Sanitize**: fenced blocks, comments and trailing commas are dealt with,
//!    and badly broken output falls back to a minimal recovered document
//! 5. **Validate**: the candidate must pass the structural checks
//! 6. **Store**: the document is saved and its id returned
//!
//! # Examples
//!
//! ```no_run
//! use sitewright_generator::{GenerationRequest, Generator, GeneratorConfig};
//! use sitewright_llm::MockProvider;
//! use sitewright_store::DocumentStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = MockProvider::new(r#"{"title": "T", "description": "D",
//!     "sections": [{"type": "hero", "heading": "Hi"}]}"#);
//! let generator = Generator::new(provider, DocumentStore::new(":memory:")?, GeneratorConfig::default());
//!
//! let result = generator
//!     .generate(GenerationRequest::new("Create a landing page for a coffee shop"))
//!     .await?;
//! println!("saved as {}", result.id);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod generator;
mod hints;
mod prompt;
mod sanitizer;
mod types;

pub use config::GeneratorConfig;
pub use error::{GeneratorError, SanitizeError};
pub use generator::Generator;
pub use hints::{extract_hints, KeywordRule, COLOR_PALETTE, INDUSTRY_RULES, STYLE_RULES};
pub use prompt::{compose_user_message, system_prompt, PromptBuilder};
pub use sanitizer::{
    extract_fenced_block, recover_fallback, sanitize, strip_comments, strip_trailing_commas,
    SanitizeOutcome,
};
pub use types::{GenerationRequest, GenerationResult};
