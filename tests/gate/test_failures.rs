//! Fail-closed behaviour when the session store misbehaves or the app is
//! misconfigured.

use std::sync::Arc;

use actix_web::{App, test};

use super::test_helpers::*;

#[actix_rt::test]
async fn test_store_error_redirects() {
    let app = create_test_app(Arc::new(BrokenStore), ADMIN_SECRET, 1500).await;

    let out = get(&app, "/account/whoami", None, Some(USER_TOKEN)).await;
    assert!(out.is_unauthorized_redirect(), "got {:?}", out);
}

#[actix_rt::test]
async fn test_store_timeout_redirects() {
    let app = create_test_app(Arc::new(HangingStore), ADMIN_SECRET, 1500).await;

    let out = get(&app, "/account/whoami", None, Some(USER_TOKEN)).await;
    assert!(out.is_unauthorized_redirect(), "got {:?}", out);
}

#[actix_rt::test]
async fn test_store_panic_redirects() {
    let app = create_test_app(Arc::new(PanickingStore), ADMIN_SECRET, 1500).await;

    let out = get(&app, "/account/whoami", None, Some(USER_TOKEN)).await;
    assert!(out.is_unauthorized_redirect(), "got {:?}", out);
}

#[actix_rt::test]
async fn test_header_still_works_when_store_is_down() {
    let app = create_test_app(Arc::new(BrokenStore), ADMIN_SECRET, 1500).await;

    let out = get(&app, "/admin/whoami", Some(ADMIN_SECRET), Some(USER_TOKEN)).await;
    assert_eq!(out.status, 200);
}

#[actix_rt::test]
async fn test_missing_authenticator_redirects() {
    let app =
        test::init_service(App::new().configure(admin_gate::api::configure_page_routes)).await;

    let out = get(&app, "/admin/whoami", Some(ADMIN_SECRET), None).await;
    assert!(out.is_unauthorized_redirect(), "got {:?}", out);
}
