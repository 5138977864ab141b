//! Sitewright Storage Layer
//!
//! Implements the `KeyedStore` trait on SQLite and wraps it in a
//! [`ContentStore`] that allocates content ids.
//!
//! # Storage modes
//!
//! - [`SingleSlotStore`]: every save overwrites one fixed key, so only the
//!   latest document is retrievable and `get` ignores the id
//! - [`DocumentStore`]: true per-id storage
//!
//! [`StorageMode`] picks one from configuration; single-slot is the default.
//!
//! # Examples
//!
//! ```no_run
//! use sitewright_store::{ContentStore, DocumentStore};
//!
//! let store = ContentStore::new(DocumentStore::new("sitewright.db").unwrap());
//! let latest = store.latest().unwrap();
//! ```

#![warn(missing_docs)]

mod content_store;
mod documents;
mod mode;
mod single_slot;

pub use content_store::ContentStore;
pub use documents::DocumentStore;
pub use mode::{ConfiguredStore, StorageConfig, StorageMode};
pub use single_slot::{SingleSlotStore, SLOT_KEY};

use rusqlite::Connection;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Document could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored data is not in the expected shape
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Open a connection and make sure the schema exists
fn open_connection<P: AsRef<Path>>(path: P) -> Result<Connection, StoreError> {
    let conn = Connection::open(path)?;
    conn.execute_batch(include_str!("schema.sql"))?;
    Ok(conn)
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// SQLite stores integers as i64
fn to_sql_int(value: u64) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::InvalidData(format!("{value} exceeds i64")))
}
