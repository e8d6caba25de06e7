//! Authentication resolver: runs strategies in order, first success wins.

use std::sync::Arc;

use actix_web::HttpRequest;
use actix_web::http::header::HeaderName;
use tracing::debug;

use super::{
    AuthResult, AuthSettings, AuthStrategy, DenyReason, HeaderStrategy, RequestCredentials,
    SessionStrategy,
};
use crate::clock::{Clock, SystemClock};
use crate::session::SessionStore;

/// Resolves a request's credentials into an [`AuthResult`].
///
/// Shared across workers through `web::Data`; holds no per-request state.
pub struct Authenticator {
    admin_header: Option<HeaderName>,
    strategies: Vec<Box<dyn AuthStrategy>>,
}

impl Authenticator {
    /// Header strategy first, then session strategy, on the system clock.
    pub fn new(settings: AuthSettings, store: Arc<dyn SessionStore>) -> Self {
        Self::with_clock(settings, store, Arc::new(SystemClock))
    }

    pub fn with_clock(
        settings: AuthSettings,
        store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let strategies: Vec<Box<dyn AuthStrategy>> = vec![
            Box::new(HeaderStrategy::new(settings.admin_secret)),
            Box::new(SessionStrategy::new(store, clock, settings.store_timeout)),
        ];
        Self::with_strategies(settings.admin_header, strategies)
    }

    /// Build from an explicit, ordered strategy list.
    pub fn with_strategies(
        admin_header: Option<HeaderName>,
        strategies: Vec<Box<dyn AuthStrategy>>,
    ) -> Self {
        Self {
            admin_header,
            strategies,
        }
    }

    /// Extract the credentials this authenticator looks at.
    pub fn credentials(&self, req: &HttpRequest) -> RequestCredentials {
        RequestCredentials::from_request(req, self.admin_header.as_ref())
    }

    /// Run the strategies in order.
    ///
    /// The first `Authenticated` outcome is returned. If none succeeds, the
    /// first recorded failure is returned, or `no-session` when no strategy
    /// applied at all.
    pub async fn authenticate(&self, credentials: &RequestCredentials) -> AuthResult {
        let mut denial: Option<DenyReason> = None;

        for strategy in &self.strategies {
            match strategy.attempt(credentials).await {
                Some(AuthResult::Authenticated(identity)) => {
                    debug!(
                        strategy = strategy.name(),
                        user = %identity.id(),
                        role = %identity.role(),
                        "Request authenticated"
                    );
                    return AuthResult::Authenticated(identity);
                }
                Some(AuthResult::Unauthenticated(reason)) => {
                    debug!(
                        strategy = strategy.name(),
                        reason = %reason,
                        "Strategy rejected request"
                    );
                    denial.get_or_insert(reason);
                }
                None => {}
            }
        }

        AuthResult::Unauthenticated(denial.unwrap_or(DenyReason::NoSession))
    }
}
