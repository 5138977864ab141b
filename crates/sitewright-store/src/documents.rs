//! Per-document storage keyed by content id

use rusqlite::{params, Connection, OptionalExtension};
use sitewright_domain::traits::KeyedStore;
use sitewright_domain::{ContentId, StoredDocument, WebsiteContent};
use std::path::Path;
use tracing::debug;

use crate::{now_millis, open_connection, to_sql_int, StoreError};

/// Stores every document under its own id
pub struct DocumentStore {
    conn: Connection,
}

impl DocumentStore {
    /// Open (or create) the store at `path`
    ///
    /// Use `:memory:` for an in-memory database.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Ok(Self {
            conn: open_connection(path)?,
        })
    }

    /// Number of stored documents
    pub fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    fn row_to_document(id: i64, content: String, saved_at: i64) -> Result<StoredDocument, StoreError> {
        let id = u64::try_from(id)
            .map_err(|_| StoreError::InvalidData(format!("negative document id {id}")))?;
        Ok(StoredDocument {
            id: ContentId::from_value(id),
            content: serde_json::from_str(&content)?,
            saved_at: saved_at.max(0) as u64,
        })
    }

    fn query_one(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Option<StoredDocument>, StoreError> {
        let row: Option<(i64, String, i64)> = self
            .conn
            .query_row(sql, args, |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
            .optional()?;

        row.map(|(id, content, saved_at)| Self::row_to_document(id, content, saved_at))
            .transpose()
    }
}

impl KeyedStore for DocumentStore {
    type Error = StoreError;

    fn put(&mut self, id: ContentId, content: &WebsiteContent) -> Result<(), Self::Error> {
        let json = serde_json::to_string(content)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO documents (id, content, saved_at) VALUES (?1, ?2, ?3)",
            params![to_sql_int(id.value())?, json, to_sql_int(now_millis())?],
        )?;
        debug!(%id, "Stored document");
        Ok(())
    }

    fn get(&self, id: ContentId) -> Result<Option<StoredDocument>, Self::Error> {
        let id = to_sql_int(id.value())?;
        self.query_one(
            "SELECT id, content, saved_at FROM documents WHERE id = ?1",
            &[&id],
        )
    }

    fn latest(&self) -> Result<Option<StoredDocument>, Self::Error> {
        self.query_one(
            "SELECT id, content, saved_at FROM documents ORDER BY id DESC LIMIT 1",
            &[],
        )
    }
}
