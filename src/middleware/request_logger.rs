//! Request logging middleware.
//!
//! Logs which credentials a request presented (presence only, never the
//! values) alongside the usual method/path/status/duration fields.

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::HeaderName;
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::time::Instant;
use tracing::{info, warn};

use crate::session::SESSION_COOKIE;

/// Request logger middleware factory.
#[derive(Debug, Clone, Default)]
pub struct RequestLogger {
    admin_header: Option<HeaderName>,
}

impl RequestLogger {
    /// Also report whether the given admin header was present.
    pub fn with_admin_header(admin_header: Option<HeaderName>) -> Self {
        Self { admin_header }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware {
            service,
            admin_header: self.admin_header.clone(),
        }))
    }
}

/// Request logger middleware service.
pub struct RequestLoggerMiddleware<S> {
    service: S,
    admin_header: Option<HeaderName>,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let remote_addr = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();

        let has_admin_header = self
            .admin_header
            .as_ref()
            .is_some_and(|name| req.headers().contains_key(name));
        let has_session = req.cookie(SESSION_COOKIE).is_some();

        info!(
            target: "gate",
            method = %method,
            path = %path,
            remote_addr = %remote_addr,
            admin_header = has_admin_header,
            session_cookie = has_session,
            "→ Request started"
        );

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            let elapsed = start.elapsed();
            let status = res.status();

            if status.is_success() {
                info!(
                    target: "gate",
                    method = %method,
                    path = %path,
                    status = status.as_u16(),
                    duration_ms = %elapsed.as_millis(),
                    "← Request completed"
                );
            } else if status.is_redirection() || status.is_client_error() {
                info!(
                    target: "gate",
                    method = %method,
                    path = %path,
                    status = status.as_u16(),
                    duration_ms = %elapsed.as_millis(),
                    "← Request redirected or rejected"
                );
            } else {
                warn!(
                    target: "gate",
                    method = %method,
                    path = %path,
                    status = status.as_u16(),
                    duration_ms = %elapsed.as_millis(),
                    "← Server error"
                );
            }

            Ok(res)
        })
    }
}
