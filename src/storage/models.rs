use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored short URL.
///
/// Serialized with the camelCase field names of the persisted snapshot;
/// timestamps are ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    pub id: String,
    pub original_url: String,
    pub shortcode: String,
    pub created_at: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,

    #[serde(default)]
    pub clicks: u64,
}

impl UrlRecord {
    /// Expired once `now` is strictly past the expiry timestamp
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expiry_date
    }

    /// Minutes left before expiry, zero once expired
    pub fn remaining_minutes(&self, now: DateTime<Utc>) -> i64 {
        (self.expiry_date - now).num_minutes().max(0)
    }
}
