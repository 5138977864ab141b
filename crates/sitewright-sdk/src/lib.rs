//! Sitewright Rust SDK
//!
//! Client library for the Sitewright generation service.
//!
//! The client extracts style hints locally, retries rate-limited and
//! network-failed requests with exponential backoff, turns failure bodies
//! into [`SdkError`] variants with user-facing messages, and re-validates
//! every document it receives.
//!
//! # Example
//!
//! ```no_run
//! use sitewright_sdk::SiteClient;
//!
//! # async fn example() -> Result<(), sitewright_sdk::SdkError> {
//! let client = SiteClient::new("http://localhost:3000");
//! let site = client.generate("A landing page for a coffee shop").await?;
//! println!("{} ({} sections)", site.content.title, site.content.sections.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod error;

pub use client::{GeneratedSite, SiteClient};
pub use error::SdkError;
