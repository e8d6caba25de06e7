//! Session record stored against a session token.

use serde::{Deserialize, Serialize};

use crate::models::Role;

/// Value kept in the session store for one token.
///
/// Timestamps are epoch seconds. `expires_at` is fixed at creation as
/// `created_at + ttl`; access never extends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SessionRecord {
    pub user_id: String,
    pub role: Role,
    pub created_at: i64,
    pub expires_at: i64,
}

impl SessionRecord {
    /// Create a record for a session starting at `created_at`.
    pub fn new(user_id: impl Into<String>, role: Role, created_at: i64, ttl_secs: u64) -> Self {
        let ttl = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        Self {
            user_id: user_id.into(),
            role,
            created_at,
            expires_at: created_at.saturating_add(ttl),
        }
    }

    /// A record is expired once `now` reaches `expires_at`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}
