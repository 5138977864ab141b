//! Content identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Identifier handed back after a document is saved.
///
/// The value is the save time in milliseconds since the Unix epoch, which
/// keeps ids chronologically sortable. On the wire it is a decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ContentId(u64);

impl ContentId {
    /// Create an id from the current wall-clock time
    ///
    /// # Examples
    ///
    /// ```
    /// use sitewright_domain::ContentId;
    ///
    /// let id = ContentId::now();
    /// assert!(id.value() > 0);
    /// ```
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self(millis)
    }

    /// Create an id from a raw millisecond timestamp
    pub fn from_value(value: u64) -> Self {
        Self(value)
    }

    /// Parse an id from its decimal string form
    ///
    /// # Examples
    ///
    /// ```
    /// use sitewright_domain::ContentId;
    ///
    /// let id = ContentId::parse("1700000000000").unwrap();
    /// assert_eq!(id.value(), 1_700_000_000_000);
    /// assert!(ContentId::parse("latest").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| format!("Invalid content id '{}': {}", s, e))
    }

    /// Get the raw millisecond value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The next id in sequence
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ContentId> for String {
    fn from(id: ContentId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for ContentId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ContentId::parse(&value)
    }
}
