//! In-process session store backed by a map.
//!
//! Values are held in their encoded form, exactly as a remote key-value
//! namespace would hold them, and carry a physical deadline derived from
//! the TTL given to `put`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use super::{SessionRecord, SessionStore, SessionToken, StoreError, codec};

/// Deadline used when `now + ttl` does not fit in an `Instant`.
const MAX_RETENTION: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

struct Entry {
    value: String,
    evict_at: Instant,
}

/// In-memory session store. Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, including ones awaiting eviction.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Store an already-encoded value. Lets callers seed raw data.
    pub async fn put_raw(&self, token: &SessionToken, value: impl Into<String>, ttl_secs: u64) {
        let now = Instant::now();
        let evict_at = now
            .checked_add(Duration::from_secs(ttl_secs))
            .unwrap_or(now + MAX_RETENTION);
        let entry = Entry {
            value: value.into(),
            evict_at,
        };
        self.entries
            .write()
            .await
            .insert(token.as_str().to_string(), entry);
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, token: &SessionToken) -> Result<Option<SessionRecord>, StoreError> {
        let entries = self.entries.read().await;
        let Some(entry) = entries.get(token.as_str()) else {
            return Ok(None);
        };
        if Instant::now() >= entry.evict_at {
            return Ok(None);
        }
        Ok(codec::decode(&entry.value))
    }

    async fn put(
        &self,
        token: &SessionToken,
        record: &SessionRecord,
        ttl_secs: u64,
    ) -> Result<(), StoreError> {
        let value = codec::encode(record).map_err(|e| StoreError::Backend(e.to_string()))?;
        self.put_raw(token, value, ttl_secs).await;
        Ok(())
    }

    async fn delete(&self, token: &SessionToken) -> Result<(), StoreError> {
        self.entries.write().await.remove(token.as_str());
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, StoreError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| now < entry.evict_at);
        Ok((before - entries.len()) as u64)
    }
}
