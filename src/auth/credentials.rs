//! Credentials pulled off an incoming request.

use actix_web::HttpRequest;
use actix_web::http::header::HeaderName;
use secrecy::SecretString;

use crate::session::{SESSION_COOKIE, SessionToken};

/// What a request presents for authentication.
///
/// The header value is wrapped in `SecretString` as soon as it is read.
#[derive(Debug, Default)]
pub struct RequestCredentials {
    pub admin_header: Option<SecretString>,
    pub session_token: Option<SessionToken>,
}

impl RequestCredentials {
    /// Read the admin header (when a header name is configured) and the
    /// session cookie. Empty or non-UTF-8 values count as absent.
    pub fn from_request(req: &HttpRequest, admin_header: Option<&HeaderName>) -> Self {
        let admin_header = admin_header
            .and_then(|name| req.headers().get(name))
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(|v| SecretString::from(v.to_string()));

        let session_token = req
            .cookie(SESSION_COOKIE)
            .and_then(|c| SessionToken::new(c.value()));

        Self {
            admin_header,
            session_token,
        }
    }

    /// Credentials carrying only a session token.
    pub fn with_session(token: &str) -> Self {
        Self {
            admin_header: None,
            session_token: SessionToken::new(token),
        }
    }

    /// Add an admin header value.
    pub fn and_admin_header(mut self, value: &str) -> Self {
        self.admin_header = Some(SecretString::from(value.to_string()));
        self
    }
}
