//! Dual-strategy authentication: admin header secret, then cookie session.
//!
//! # Security
//! - The configured secret and presented header values are wrapped in
//!   `SecretString` and never logged
//! - Secret comparison is constant-time (see [`secrets_match`])
//! - The authenticate path only reads from the session store

mod compare;
mod credentials;
mod extractor;
mod resolver;
mod strategy;

use std::time::Duration;

use actix_web::http::header::HeaderName;
use secrecy::{ExposeSecret, SecretString};

pub use compare::secrets_match;
pub use credentials::RequestCredentials;
pub use extractor::CurrentIdentity;
pub use resolver::Authenticator;
pub use strategy::{AuthStrategy, HeaderStrategy, SessionStrategy};

use crate::config::{Config, ConfigError};
use crate::models::Identity;

/// Configured admin header secret.
///
/// An empty or absent secret disables header authentication entirely.
/// `Debug` prints `[REDACTED]`.
#[derive(Clone)]
pub struct AdminSecret(Option<SecretString>);

impl AdminSecret {
    pub fn new(secret: Option<String>) -> Self {
        Self(secret.filter(|s| !s.is_empty()).map(SecretString::from))
    }

    /// Whether a secret is configured.
    pub fn is_enabled(&self) -> bool {
        self.0.is_some()
    }

    /// Check a presented header value against the secret in constant time.
    pub fn verify(&self, presented: &str) -> bool {
        match &self.0 {
            Some(secret) if !presented.is_empty() => {
                secrets_match(presented.as_bytes(), secret.expose_secret().as_bytes())
            }
            _ => false,
        }
    }
}

impl std::fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(_) => write!(f, "AdminSecret([REDACTED])"),
            None => write!(f, "AdminSecret(None)"),
        }
    }
}

/// Settings the authenticator needs, derived from [`Config`].
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Header carrying the admin credential; `None` disables header auth.
    pub admin_header: Option<HeaderName>,
    pub admin_secret: AdminSecret,
    /// Upper bound on a single session store lookup.
    pub store_timeout: Duration,
}

impl AuthSettings {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            admin_header: parse_header_name(config.admin_auth_header.as_deref())?,
            admin_secret: AdminSecret::new(config.admin_auth_secret.clone()),
            store_timeout: Duration::from_millis(config.store_timeout_ms),
        })
    }

    /// Header auth needs both a header name and a secret.
    pub fn header_auth_enabled(&self) -> bool {
        self.admin_header.is_some() && self.admin_secret.is_enabled()
    }
}

/// Parse a configured header name. Empty means "not configured".
pub fn parse_header_name(name: Option<&str>) -> Result<Option<HeaderName>, ConfigError> {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(n) => HeaderName::from_bytes(n.as_bytes())
            .map(Some)
            .map_err(|_| {
                ConfigError::InvalidValue("ADMIN_AUTH_HEADER must be a valid header name")
            }),
        None => Ok(None),
    }
}

/// Why resolution failed. Diagnostic only; never shown to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    NoSession,
    SessionNotFound,
    SessionExpired,
    StoreUnavailable,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoSession => "no-session",
            Self::SessionNotFound => "session-not-found",
            Self::SessionExpired => "session-expired",
            Self::StoreUnavailable => "store-unavailable",
        }
    }
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of authenticating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    Authenticated(Identity),
    Unauthenticated(DenyReason),
}

impl AuthResult {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Unauthenticated(_) => None,
        }
    }
}
