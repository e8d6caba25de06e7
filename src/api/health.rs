//! Health check endpoints.

use std::time::Duration;

use actix_web::{HttpResponse, get, web};
use chrono::Utc;
use serde::Serialize;

use crate::error::AppResult;
use crate::session::{SessionStore, SessionToken, StoreError};

/// Upper bound on the readiness probe's store lookup.
const READY_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

/// Readiness check response.
#[derive(Serialize)]
pub struct ReadyResponse {
    status: &'static str,
    session_store: &'static str,
}

/// Returns 200 if the service is running.
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Returns 200 if the session store answers a lookup, 503 otherwise.
#[get("/ready")]
pub async fn ready(store: web::Data<dyn SessionStore>) -> AppResult<HttpResponse> {
    let probe = SessionToken::generated("readiness-probe".to_string());
    tokio::time::timeout(READY_PROBE_TIMEOUT, store.get(&probe))
        .await
        .unwrap_or(Err(StoreError::Timeout))?;

    Ok(HttpResponse::Ok().json(ReadyResponse {
        status: "ready",
        session_store: "connected",
    }))
}

/// Configure health routes.
pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(ready);
}
