//! Id allocation on top of a [`KeyedStore`]

use sitewright_domain::traits::KeyedStore;
use sitewright_domain::{ContentId, StoredDocument, WebsiteContent};
use tracing::info;

/// Saves validated documents and hands back their ids
///
/// Ids are millisecond timestamps. Two saves within the same millisecond
/// (or after the clock steps back) still get strictly increasing ids.
pub struct ContentStore<S: KeyedStore> {
    inner: S,
    last_id: Option<ContentId>,
}

impl<S: KeyedStore> ContentStore<S> {
    /// Wrap a keyed store
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            last_id: None,
        }
    }

    /// Persist `content` under a freshly allocated id
    pub fn save(&mut self, content: &WebsiteContent) -> Result<ContentId, S::Error> {
        let id = self.allocate_id(ContentId::now());
        self.inner.put(id, content)?;
        self.last_id = Some(id);

        info!(%id, sections = content.sections.len(), "Saved website content");
        Ok(id)
    }

    /// Fetch the document saved under `id`
    pub fn load(&self, id: ContentId) -> Result<Option<StoredDocument>, S::Error> {
        self.inner.get(id)
    }

    /// Fetch the most recently saved document
    pub fn latest(&self) -> Result<Option<StoredDocument>, S::Error> {
        self.inner.latest()
    }

    fn allocate_id(&self, now: ContentId) -> ContentId {
        match self.last_id {
            Some(last) if now <= last => last.next(),
            _ => now,
        }
    }
}
