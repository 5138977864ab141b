//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and its
//! infrastructure. Implementations live in other crates.

use crate::{ContentId, StoredDocument, WebsiteContent};

/// Key-value persistence for validated documents
///
/// Implemented by the infrastructure layer (sitewright-store). Whether `id`
/// really selects a document is up to the implementation: a single-slot
/// store keeps only the most recent `put` and answers every `get` with it.
pub trait KeyedStore {
    /// Error type for store operations
    type Error;

    /// Persist a document under `id`
    fn put(&mut self, id: ContentId, content: &WebsiteContent) -> Result<(), Self::Error>;

    /// Fetch the document for `id`
    fn get(&self, id: ContentId) -> Result<Option<StoredDocument>, Self::Error>;

    /// Fetch the most recently saved document
    fn latest(&self) -> Result<Option<StoredDocument>, Self::Error>;
}
