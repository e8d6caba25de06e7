//! Session issuance and revocation: the write side used by login and logout.

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::Role;
use crate::session::{SessionRecord, SessionStore, SessionToken};

/// Bytes of randomness in a session token.
const TOKEN_BYTES: usize = 32;

/// Generate a random session token (hex encoded).
pub fn generate_token() -> SessionToken {
    let random_bytes: [u8; TOKEN_BYTES] = rand::random();
    SessionToken::generated(hex::encode(random_bytes))
}

/// Create a session for `user_id` starting at `now`, valid for `ttl_secs`.
///
/// Returns the token to hand to the client along with the stored record.
pub async fn issue_session(
    store: &dyn SessionStore,
    user_id: &str,
    role: Role,
    ttl_secs: u64,
    now: i64,
) -> AppResult<(SessionToken, SessionRecord)> {
    if user_id.trim().is_empty() {
        return Err(AppError::InvalidInput("User id is required".to_string()));
    }
    if ttl_secs == 0 {
        return Err(AppError::InvalidInput(
            "Session TTL must be positive".to_string(),
        ));
    }

    let token = generate_token();
    let record = SessionRecord::new(user_id, role, now, ttl_secs);
    store.put(&token, &record, ttl_secs).await?;

    info!(user = %user_id, role = %role, expires_at = record.expires_at, "Session issued");
    Ok((token, record))
}

/// Delete a session.
pub async fn revoke_session(store: &dyn SessionStore, token: &SessionToken) -> AppResult<()> {
    store.delete(token).await?;
    info!("Session revoked");
    Ok(())
}
