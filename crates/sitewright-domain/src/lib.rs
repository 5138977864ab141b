//! Sitewright Domain Layer
//!
//! This crate contains the data model shared by every Sitewright layer. It
//! depends only on `serde`, since every document crosses the model, HTTP and
//! storage boundaries as JSON.
//!
//! ## Key Concepts
//!
//! - **Style hints**: industry/style/colour signals derived from a prompt
//! - **Website content**: the structured document a model generates
//! - **Sections**: tagged variants keyed by their `type` discriminator
//! - **Content id**: timestamp-derived identifier handed back after a save
//!
//! ## Architecture
//!
//! - Pure data and trait definitions only
//! - Infrastructure implementations live in other crates
//! - `KeyedStore` is the storage boundary implemented by `sitewright-store`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod content;
pub mod hints;
pub mod id;
mod lenient;
pub mod section;
pub mod traits;

// Re-exports for convenience
pub use content::{StoredDocument, ThemeSettings, WebsiteContent};
pub use hints::StyleHints;
pub use id::ContentId;
pub use section::{
    ContactInfo, PricingPlan, SectionFields, SectionItem, Testimonial, WebsiteSection,
};
