//! PostgreSQL-backed session store using SeaORM.
//!
//! Tokens are stored as SHA-256 hashes so a database dump does not leak
//! usable session cookies. The payload column holds the codec encoding.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use sha2::{Digest, Sha256};

use super::{SessionRecord, SessionStore, SessionToken, StoreError, codec};
use crate::db::DbPool;
use crate::entity::session;

/// Hash a session token for storage.
pub fn hash_token(token: &SessionToken) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_str().as_bytes());
    hex::encode(hasher.finalize())
}

/// Session store persisted in the `session` table.
#[derive(Clone)]
pub struct PgSessionStore {
    pool: DbPool,
}

impl PgSessionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn get(&self, token: &SessionToken) -> Result<Option<SessionRecord>, StoreError> {
        let row = session::Entity::find_by_id(hash_token(token))
            .filter(session::Column::ExpiresAt.gt(Utc::now()))
            .one(self.pool.connection())
            .await?;

        Ok(row.and_then(|m| codec::decode(&m.payload)))
    }

    async fn put(
        &self,
        token: &SessionToken,
        record: &SessionRecord,
        ttl_secs: u64,
    ) -> Result<(), StoreError> {
        let payload = codec::encode(record).map_err(|e| StoreError::Backend(e.to_string()))?;
        let now = Utc::now();
        let ttl = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        let expires_at = chrono::Duration::try_seconds(ttl)
            .and_then(|d| now.checked_add_signed(d))
            .unwrap_or(chrono::DateTime::<Utc>::MAX_UTC);

        let model = session::ActiveModel {
            token_hash: Set(hash_token(token)),
            payload: Set(payload),
            expires_at: Set(expires_at),
            created_at: Set(now),
        };

        session::Entity::insert(model)
            .on_conflict(
                OnConflict::column(session::Column::TokenHash)
                    .update_columns([session::Column::Payload, session::Column::ExpiresAt])
                    .to_owned(),
            )
            .exec(self.pool.connection())
            .await?;

        Ok(())
    }

    async fn delete(&self, token: &SessionToken) -> Result<(), StoreError> {
        session::Entity::delete_by_id(hash_token(token))
            .exec(self.pool.connection())
            .await?;
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, StoreError> {
        let result = session::Entity::delete_many()
            .filter(session::Column::ExpiresAt.lte(Utc::now()))
            .exec(self.pool.connection())
            .await?;
        Ok(result.rows_affected)
    }
}
