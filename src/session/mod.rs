//! Session storage: records, codec and the key-value store abstraction.
//!
//! A store maps an opaque session token to a [`SessionRecord`]. Stores may
//! evict entries physically at or after their TTL, but readers must still
//! check `expires_at` themselves: eviction is best-effort.

pub mod codec;
mod memory;
mod postgres;
mod record;

use async_trait::async_trait;

pub use memory::MemorySessionStore;
pub use postgres::PgSessionStore;
pub use record::SessionRecord;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// Opaque session token taken from the request cookie.
///
/// Never parsed; only used verbatim as a lookup key. `Debug` is redacted
/// so tokens do not end up in logs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token. Returns `None` for an empty value.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() { None } else { Some(Self(raw)) }
    }

    /// Wrap a freshly generated, known non-empty token.
    pub(crate) fn generated(raw: String) -> Self {
        debug_assert!(!raw.is_empty());
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionToken([REDACTED])")
    }
}

/// Session store failures. Malformed or missing entries are not errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Session store backend error: {0}")]
    Backend(String),

    #[error("Session store lookup timed out")]
    Timeout,
}

impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Key-value session storage, polymorphic over the backing technology.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Look up a token. Missing or undecodable entries yield `Ok(None)`;
    /// `Err` is reserved for an unreachable backend.
    async fn get(&self, token: &SessionToken) -> Result<Option<SessionRecord>, StoreError>;

    /// Store a record. The backend may evict it once `ttl_secs` have passed.
    async fn put(
        &self,
        token: &SessionToken,
        record: &SessionRecord,
        ttl_secs: u64,
    ) -> Result<(), StoreError>;

    /// Remove a token. Removing an unknown token is not an error.
    async fn delete(&self, token: &SessionToken) -> Result<(), StoreError>;

    /// Physically remove entries past their store-level expiry.
    /// Returns the number of entries removed.
    async fn purge_expired(&self) -> Result<u64, StoreError> {
        Ok(0)
    }
}
