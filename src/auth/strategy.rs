//! Authentication strategies tried in order by the [`Authenticator`].
//!
//! [`Authenticator`]: super::Authenticator

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use tracing::warn;

use super::{AdminSecret, AuthResult, DenyReason, RequestCredentials};
use crate::clock::Clock;
use crate::models::Identity;
use crate::session::{SessionRecord, SessionStore, SessionToken, StoreError};

/// One way of authenticating a request.
///
/// `None` means the strategy does not apply and the next one should run.
/// `Some(Unauthenticated(_))` records a failure but still lets later
/// strategies try.
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn attempt(&self, credentials: &RequestCredentials) -> Option<AuthResult>;
}

/// Pre-shared secret presented in a configured header.
///
/// Never touches the session store. An invalid header falls through
/// silently rather than denying.
pub struct HeaderStrategy {
    secret: AdminSecret,
}

impl HeaderStrategy {
    pub fn new(secret: AdminSecret) -> Self {
        Self { secret }
    }
}

#[async_trait]
impl AuthStrategy for HeaderStrategy {
    fn name(&self) -> &'static str {
        "header"
    }

    async fn attempt(&self, credentials: &RequestCredentials) -> Option<AuthResult> {
        let presented = credentials.admin_header.as_ref()?;
        if !self.secret.verify(presented.expose_secret()) {
            return None;
        }
        Some(AuthResult::Authenticated(Identity::header_admin()))
    }
}

/// Cookie-carried token looked up in the session store.
pub struct SessionStrategy {
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl SessionStrategy {
    pub fn new(store: Arc<dyn SessionStore>, clock: Arc<dyn Clock>, timeout: Duration) -> Self {
        Self {
            store,
            clock,
            timeout,
        }
    }

    /// Store lookup bounded by the configured timeout.
    async fn lookup(&self, token: &SessionToken) -> Result<Option<SessionRecord>, StoreError> {
        tokio::time::timeout(self.timeout, self.store.get(token))
            .await
            .unwrap_or(Err(StoreError::Timeout))
    }
}

#[async_trait]
impl AuthStrategy for SessionStrategy {
    fn name(&self) -> &'static str {
        "session"
    }

    async fn attempt(&self, credentials: &RequestCredentials) -> Option<AuthResult> {
        let Some(token) = credentials.session_token.as_ref() else {
            return Some(AuthResult::Unauthenticated(DenyReason::NoSession));
        };

        let record = match self.lookup(token).await {
            Ok(Some(record)) => record,
            Ok(None) => return Some(AuthResult::Unauthenticated(DenyReason::SessionNotFound)),
            Err(e) => {
                warn!("Session store lookup failed: {}", e);
                return Some(AuthResult::Unauthenticated(DenyReason::StoreUnavailable));
            }
        };

        // Stores evict lazily, so expiry is always re-checked here
        if record.is_expired_at(self.clock.now()) {
            return Some(AuthResult::Unauthenticated(DenyReason::SessionExpired));
        }

        match Identity::new(record.user_id, record.role) {
            Some(identity) => Some(AuthResult::Authenticated(identity)),
            None => Some(AuthResult::Unauthenticated(DenyReason::SessionNotFound)),
        }
    }
}
