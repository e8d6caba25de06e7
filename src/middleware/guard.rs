//! Route guards: resolve the caller, enforce the role, publish the identity.
//!
//! Per request: `Start -> Resolving -> Allowed | Denied`. Allowed requests
//! carry an [`Identity`] in their extensions; denied requests get the
//! [`Redirect`] response and never reach the wrapped service. There is no
//! retry.

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{Error, HttpMessage, ResponseError, web};
use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::panic::AssertUnwindSafe;
use std::rc::Rc;
use tracing::{debug, error};

use crate::auth::{AuthResult, Authenticator};
use crate::error::Redirect;
use crate::models::Identity;

/// What a guard requires of the resolved identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any authenticated identity.
    Authenticated,
    /// Identity must hold the admin role.
    Admin,
}

/// Apply an access policy to a resolution outcome.
///
/// A non-admin identity under [`Access::Admin`] fails exactly like an
/// unauthenticated request.
pub fn authorize(result: AuthResult, access: Access) -> Result<Identity, Redirect> {
    match (result, access) {
        (AuthResult::Authenticated(identity), Access::Authenticated) => Ok(identity),
        (AuthResult::Authenticated(identity), Access::Admin) if identity.is_admin() => {
            Ok(identity)
        }
        (AuthResult::Authenticated(identity), Access::Admin) => {
            debug!(user = %identity.id(), role = %identity.role(), "Admin role required");
            Err(Redirect::unauthorized())
        }
        (AuthResult::Unauthenticated(reason), _) => {
            debug!(reason = %reason, "Request not authenticated");
            Err(Redirect::unauthorized())
        }
    }
}

/// Guard middleware factory.
///
/// Requires an [`Authenticator`] registered as `web::Data`.
///
/// ```ignore
/// web::scope("/admin").wrap(AuthGuard::admin())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthGuard {
    access: Access,
}

impl AuthGuard {
    /// Any authenticated caller.
    pub fn authenticated() -> Self {
        Self {
            access: Access::Authenticated,
        }
    }

    /// Admin callers only.
    pub fn admin() -> Self {
        Self {
            access: Access::Admin,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGuardMiddleware {
            service: Rc::new(service),
            access: self.access,
        }))
    }
}

/// Guard middleware service.
pub struct AuthGuardMiddleware<S> {
    service: Rc<S>,
    access: Access,
}

impl<S, B> Service<ServiceRequest> for AuthGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let access = self.access;

        Box::pin(async move {
            let Some(authenticator) = req.app_data::<web::Data<Authenticator>>().cloned() else {
                error!("Authenticator not registered; denying request");
                return Ok(deny(req));
            };

            let credentials = authenticator.credentials(req.request());

            // A panicking store must still end in the redirect, not a raw 500
            let outcome = AssertUnwindSafe(authenticator.authenticate(&credentials))
                .catch_unwind()
                .await;

            let result = match outcome {
                Ok(result) => result,
                Err(_) => {
                    error!("Authentication panicked; denying request");
                    return Ok(deny(req));
                }
            };

            match authorize(result, access) {
                Ok(identity) => {
                    req.extensions_mut().insert(identity);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(_) => Ok(deny(req)),
            }
        })
    }
}

fn deny<B>(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
    req.into_response(Redirect::unauthorized().error_response())
        .map_into_right_body()
}
