//! Shared test helpers for guard tests.

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test, web};
use admin_gate::auth::{AdminSecret, AuthSettings, Authenticator};
use admin_gate::clock::FixedClock;
use admin_gate::models::Role;
use admin_gate::session::{
    MemorySessionStore, SESSION_COOKIE, SessionRecord, SessionStore, SessionToken, StoreError,
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Admin header name used in tests.
pub const ADMIN_HEADER: &str = "X-Admin-Auth";
/// Admin secret used in tests.
pub const ADMIN_SECRET: &str = "s3cr3t";

/// Token of a `user` session: created 1000, expires 1700.
pub const USER_TOKEN: &str = "abc123";
/// Token of an `admin` session: created 1000, expires 1700.
pub const ADMIN_TOKEN: &str = "adm456";
/// Token whose stored value is not a session record.
pub const GARBAGE_TOKEN: &str = "garbage";

/// Memory store that counts every call.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemorySessionStore,
    pub gets: AtomicUsize,
    pub writes: AtomicUsize,
}

impl CountingStore {
    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStore for CountingStore {
    async fn get(&self, token: &SessionToken) -> Result<Option<SessionRecord>, StoreError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(token).await
    }

    async fn put(
        &self,
        token: &SessionToken,
        record: &SessionRecord,
        ttl_secs: u64,
    ) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.put(token, record, ttl_secs).await
    }

    async fn delete(&self, token: &SessionToken) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(token).await
    }

    async fn purge_expired(&self) -> Result<u64, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.purge_expired().await
    }
}

/// Store whose backend is unreachable.
pub struct BrokenStore;

#[async_trait]
impl SessionStore for BrokenStore {
    async fn get(&self, _: &SessionToken) -> Result<Option<SessionRecord>, StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn put(&self, _: &SessionToken, _: &SessionRecord, _: u64) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn delete(&self, _: &SessionToken) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }
}

/// Store that hangs on every lookup.
pub struct HangingStore;

#[async_trait]
impl SessionStore for HangingStore {
    async fn get(&self, _: &SessionToken) -> Result<Option<SessionRecord>, StoreError> {
        std::future::pending::<()>().await;
        Ok(None)
    }

    async fn put(&self, _: &SessionToken, _: &SessionRecord, _: u64) -> Result<(), StoreError> {
        Ok(())
    }

    async fn delete(&self, _: &SessionToken) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Store that panics on lookup.
pub struct PanickingStore;

#[async_trait]
impl SessionStore for PanickingStore {
    async fn get(&self, _: &SessionToken) -> Result<Option<SessionRecord>, StoreError> {
        panic!("store driver fault");
    }

    async fn put(&self, _: &SessionToken, _: &SessionRecord, _: u64) -> Result<(), StoreError> {
        Ok(())
    }

    async fn delete(&self, _: &SessionToken) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Store seeded with the fixture sessions.
pub async fn seeded_store() -> Arc<CountingStore> {
    let store = CountingStore::default();
    let user = SessionRecord::new("u1", Role::User, 1000, 700);
    let admin = SessionRecord::new("u2", Role::Admin, 1000, 700);
    // Physical TTL far beyond the logical one: eviction is not what denies
    store
        .inner
        .put(&SessionToken::new(USER_TOKEN).unwrap(), &user, 86_400)
        .await
        .unwrap();
    store
        .inner
        .put(&SessionToken::new(ADMIN_TOKEN).unwrap(), &admin, 86_400)
        .await
        .unwrap();
    store
        .inner
        .put_raw(&SessionToken::new(GARBAGE_TOKEN).unwrap(), "{\"userId\":", 86_400)
        .await;
    Arc::new(store)
}

/// Auth settings with the given secret and a short lookup timeout.
pub fn settings(secret: &str) -> AuthSettings {
    AuthSettings {
        admin_header: Some(header::HeaderName::from_static("x-admin-auth")),
        admin_secret: AdminSecret::new(Some(secret.to_string())),
        store_timeout: Duration::from_millis(100),
    }
}

/// Create a test app guarding `/admin` and `/account`.
pub async fn create_test_app(
    store: Arc<dyn SessionStore>,
    secret: &str,
    now: i64,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let authenticator =
        Authenticator::with_clock(settings(secret), store, Arc::new(FixedClock(now)));

    test::init_service(
        App::new()
            .app_data(web::Data::new(authenticator))
            .configure(admin_gate::api::configure_page_routes),
    )
    .await
}

/// Outcome of a guarded request.
#[derive(Debug, PartialEq)]
pub struct Outcome {
    pub status: u16,
    pub location: Option<String>,
    pub body: Vec<u8>,
}

impl Outcome {
    pub fn is_unauthorized_redirect(&self) -> bool {
        self.status == 302
            && self.location.as_deref() == Some("/unauthorized")
            && self.body.is_empty()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }
}

/// Send a GET with optional admin header and session cookie.
pub async fn get<S>(app: &S, uri: &str, admin_header: Option<&str>, cookie: Option<&str>) -> Outcome
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut req = test::TestRequest::get().uri(uri);
    if let Some(value) = admin_header {
        req = req.insert_header((ADMIN_HEADER, value));
    }
    if let Some(token) = cookie {
        req = req.cookie(Cookie::new(SESSION_COOKIE, token.to_string()));
    }

    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status().as_u16();
    let location = resp
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = test::read_body(resp).await.to_vec();

    Outcome {
        status,
        location,
        body,
    }
}
