//! Reference scenarios: header admin, user session, expired session,
//! no credentials, disabled header secret.

use super::test_helpers::*;

/// (1) Valid admin header → admin identity, no store lookup.
#[actix_rt::test]
async fn test_header_credential_grants_admin() {
    let store = seeded_store().await;
    let app = create_test_app(store.clone(), ADMIN_SECRET, 1500).await;

    let out = get(&app, "/admin/whoami", Some("s3cr3t"), None).await;

    assert_eq!(out.status, 200);
    assert_eq!(out.json()["id"], "admin-header");
    assert_eq!(out.json()["role"], "admin");
    assert_eq!(store.gets(), 0, "header auth must not touch the store");
}

/// (2) User session before expiry → general guard allows, admin guard denies.
#[actix_rt::test]
async fn test_user_session_roles() {
    let store = seeded_store().await;
    let app = create_test_app(store, ADMIN_SECRET, 1500).await;

    let account = get(&app, "/account/whoami", None, Some(USER_TOKEN)).await;
    assert_eq!(account.status, 200);
    assert_eq!(account.json()["id"], "u1");
    assert_eq!(account.json()["role"], "user");

    let admin = get(&app, "/admin/whoami", None, Some(USER_TOKEN)).await;
    assert!(admin.is_unauthorized_redirect(), "got {:?}", admin);
}

/// (3) Same session after expiry → both guards deny.
#[actix_rt::test]
async fn test_expired_session_denied_everywhere() {
    let store = seeded_store().await;
    let app = create_test_app(store, ADMIN_SECRET, 1800).await;

    for uri in ["/account/whoami", "/admin/whoami"] {
        let out = get(&app, uri, None, Some(USER_TOKEN)).await;
        assert!(out.is_unauthorized_redirect(), "{} got {:?}", uri, out);
    }
}

/// (4) No header, no cookie → redirect.
#[actix_rt::test]
async fn test_no_credentials_redirects() {
    let store = seeded_store().await;
    let app = create_test_app(store.clone(), ADMIN_SECRET, 1500).await;

    for uri in ["/account/whoami", "/admin/whoami"] {
        let out = get(&app, uri, None, None).await;
        assert!(out.is_unauthorized_redirect(), "{} got {:?}", uri, out);
    }
    assert_eq!(store.gets(), 0);
}

/// (5) Empty configured secret + empty header → header auth never matches,
/// resolution falls through to the session.
#[actix_rt::test]
async fn test_empty_secret_falls_through_to_session() {
    let store = seeded_store().await;
    let app = create_test_app(store.clone(), "", 1500).await;

    let no_cookie = get(&app, "/admin/whoami", Some(""), None).await;
    assert!(no_cookie.is_unauthorized_redirect());

    let with_cookie = get(&app, "/admin/whoami", Some(""), Some(ADMIN_TOKEN)).await;
    assert_eq!(with_cookie.status, 200);
    assert_eq!(with_cookie.json()["id"], "u2");
    assert_eq!(store.gets(), 1);
}

/// The redirect target itself is public and says nothing about the cause.
#[actix_rt::test]
async fn test_unauthorized_page() {
    let store = seeded_store().await;
    let app = create_test_app(store, ADMIN_SECRET, 1500).await;

    let out = get(&app, "/unauthorized", None, None).await;
    assert_eq!(out.status, 401);
    assert_eq!(out.body, b"Unauthorized");
}
