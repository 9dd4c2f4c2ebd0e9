//! Persisted connection data.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One saved connection.
///
/// Timestamps are Unix epoch seconds as floats, matching what earlier
/// versions of the config file contain. Unknown fields in the file are
/// ignored so newer fields can be added without breaking older binaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Full endpoint reference, e.g. `https://sshx.io/s/<token>#<secret>`.
    pub url: String,
    /// When the record was first saved. Never changes afterwards.
    #[serde(rename = "timestamp")]
    pub created_at: f64,
    /// When the record was last selected for a connection.
    pub last_used: f64,
}

impl SessionRecord {
    /// Create a fresh record saved at `now`.
    #[must_use]
    pub fn new(url: String, now: f64) -> Self {
        Self {
            url,
            created_at: now,
            last_used: now,
        }
    }
}

/// The full config document: saved connections keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionBook {
    /// Saved connections by session name.
    #[serde(default)]
    pub connections: HashMap<String, SessionRecord>,
    /// Name of the most recently saved session. Informational only; nothing
    /// reads it back to auto-select.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_connection: Option<String>,
}

impl ConnectionBook {
    /// Whether any connections are saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Look up a record by session name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SessionRecord> {
        self.connections.get(name)
    }

    /// Insert or replace the record for `name`.
    ///
    /// A replaced record keeps its original `created_at`; `last_used` is set
    /// to `now` either way. Also marks `name` as the last connection.
    pub fn upsert(&mut self, name: &str, url: String, now: f64) {
        let created_at = self
            .connections
            .get(name)
            .map_or(now, |existing| existing.created_at);

        self.connections.insert(
            name.to_string(),
            SessionRecord {
                url,
                created_at,
                last_used: now,
            },
        );
        self.last_connection = Some(name.to_string());
    }

    /// Update `last_used` for an existing record.
    ///
    /// Returns `false` if `name` is not saved.
    pub fn touch(&mut self, name: &str, now: f64) -> bool {
        match self.connections.get_mut(name) {
            Some(record) => {
                record.last_used = now;
                true
            }
            None => false,
        }
    }

    /// All records as (name, record) pairs, sorted by name.
    ///
    /// The underlying map is unordered; sorting keeps menus and logs stable.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, &SessionRecord)> {
        let mut entries: Vec<(&str, &SessionRecord)> = self
            .connections
            .iter()
            .map(|(name, record)| (name.as_str(), record))
            .collect();
        entries.sort_by_key(|(name, _)| *name);
        entries
    }
}
