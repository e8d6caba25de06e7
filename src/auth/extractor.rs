//! Actix-web extractor for the identity a guard resolved.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use std::future::{Ready, ready};

use crate::error::Redirect;
use crate::models::Identity;

/// Identity placed in the request extensions by a route guard.
///
/// ```ignore
/// async fn handler(CurrentIdentity(identity): CurrentIdentity) -> impl Responder {
///     format!("hello {}", identity.id())
/// }
/// ```
///
/// Outside a guarded scope the extractor fails with the same redirect a
/// guard would issue.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl FromRequest for CurrentIdentity {
    type Error = Redirect;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Identity>()
                .cloned()
                .map(CurrentIdentity)
                .ok_or_else(Redirect::unauthorized),
        )
    }
}
