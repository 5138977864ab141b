//! Single fixed-key storage

use rusqlite::{params, Connection, OptionalExtension};
use sitewright_domain::traits::KeyedStore;
use sitewright_domain::{ContentId, StoredDocument, WebsiteContent};
use std::path::Path;
use tracing::debug;

use crate::{now_millis, open_connection, StoreError};

/// Key every document is written under
pub const SLOT_KEY: &str = "generatedWebsiteContent";

/// Keeps only the most recently saved document
///
/// Each `put` overwrites the slot. `get` answers with the slot's document
/// whatever id is asked for, since that is the only document there is.
pub struct SingleSlotStore {
    conn: Connection,
}

impl SingleSlotStore {
    /// Open (or create) the store at `path`
    ///
    /// Use `:memory:` for an in-memory database.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Ok(Self {
            conn: open_connection(path)?,
        })
    }
}

impl KeyedStore for SingleSlotStore {
    type Error = StoreError;

    fn put(&mut self, id: ContentId, content: &WebsiteContent) -> Result<(), Self::Error> {
        let document = StoredDocument {
            id,
            content: content.clone(),
            saved_at: now_millis(),
        };
        let value = serde_json::to_string(&document)?;

        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![SLOT_KEY, value],
        )?;
        debug!(%id, key = SLOT_KEY, "Overwrote single slot");
        Ok(())
    }

    fn get(&self, _id: ContentId) -> Result<Option<StoredDocument>, Self::Error> {
        self.latest()
    }

    fn latest(&self) -> Result<Option<StoredDocument>, Self::Error> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![SLOT_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match value {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }
}
