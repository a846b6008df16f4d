use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted fragment metadata.
///
/// This is the exact shape existing API clients depend on: six keys, in this
/// order, no more and no less. Serde serializes struct fields in declaration
/// order, so the JSON produced here is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FragmentRecord {
    pub id: String,
    #[serde(rename = "ownerId")]
    pub owner_id: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    /// Content-Type header value, stored verbatim including parameters
    /// (e.g. `text/html; charset=utf-8`).
    #[serde(rename = "type")]
    pub content_type: String,
    /// Byte length of the last successfully written payload.
    pub size: u64,
}

impl FragmentRecord {
    /// Create a record with `created == updated == now` and `size == 0`.
    pub fn new<I, O, T>(id: I, owner_id: O, content_type: T) -> Self
    where
        I: Into<String>,
        O: Into<String>,
        T: Into<String>,
    {
        let now = Utc::now();
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            created: now,
            updated: now,
            content_type: content_type.into(),
            size: 0,
        }
    }
}
