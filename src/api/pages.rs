//! Routes around the guards: the redirect target and identity probes.
//!
//! `/admin/*` sits behind the admin guard and `/account/*` behind the
//! general guard. Application pages mount inside those scopes and read the
//! caller through [`CurrentIdentity`].

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, web};
use serde::Serialize;

use crate::auth::CurrentIdentity;
use crate::middleware::AuthGuard;

/// Identity echo response.
#[derive(Debug, Serialize)]
pub struct WhoAmIResponse {
    pub id: String,
    pub role: String,
}

impl From<&crate::models::Identity> for WhoAmIResponse {
    fn from(identity: &crate::models::Identity) -> Self {
        Self {
            id: identity.id().to_string(),
            role: identity.role().to_string(),
        }
    }
}

/// Landing page for denied requests. Carries no detail about the cause.
#[get("/unauthorized")]
pub async fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized()
        .content_type(ContentType::plaintext())
        .body("Unauthorized")
}

#[get("/whoami")]
pub async fn whoami(CurrentIdentity(identity): CurrentIdentity) -> HttpResponse {
    HttpResponse::Ok().json(WhoAmIResponse::from(&identity))
}

/// Configure public and guarded page routes.
pub fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(unauthorized)
        .service(web::scope("/admin").wrap(AuthGuard::admin()).service(whoami))
        .service(
            web::scope("/account")
                .wrap(AuthGuard::authenticated())
                .service(whoami),
        );
}
