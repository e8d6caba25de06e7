//! Guard properties: header precedence, disabled secret, expiry boundary,
//! role gate and idempotent denial.

use super::test_helpers::*;

/// Header wins whatever state the session cookie is in.
#[actix_rt::test]
async fn test_header_precedence_over_bad_session() {
    let store = seeded_store().await;
    // now=1800: the user session is expired
    let app = create_test_app(store.clone(), ADMIN_SECRET, 1800).await;

    for cookie in [USER_TOKEN, GARBAGE_TOKEN, "unknown-token"] {
        let out = get(&app, "/admin/whoami", Some(ADMIN_SECRET), Some(cookie)).await;
        assert_eq!(out.status, 200, "cookie {} got {:?}", cookie, out);
        assert_eq!(out.json()["role"], "admin");
        assert_eq!(out.json()["id"], "admin-header");
    }
    assert_eq!(store.gets(), 0);
}

/// With an empty secret no presented header value authenticates.
#[actix_rt::test]
async fn test_empty_secret_disables_header_auth() {
    let store = seeded_store().await;
    let app = create_test_app(store, "", 1500).await;

    for presented in ["", "s3cr3t", "anything"] {
        let out = get(&app, "/admin/whoami", Some(presented), None).await;
        assert!(out.is_unauthorized_redirect(), "header {:?} got {:?}", presented, out);

        let out = get(&app, "/account/whoami", Some(presented), Some(USER_TOKEN)).await;
        assert_eq!(out.json()["id"], "u1", "should resolve through the session");
    }
}

/// A wrong header value falls through to the session instead of denying.
#[actix_rt::test]
async fn test_wrong_header_falls_through() {
    let store = seeded_store().await;
    let app = create_test_app(store, ADMIN_SECRET, 1500).await;

    let out = get(&app, "/account/whoami", Some("s3cr3"), Some(USER_TOKEN)).await;
    assert_eq!(out.status, 200);
    assert_eq!(out.json()["id"], "u1");
    assert_eq!(out.json()["role"], "user");
}

/// `now == expiresAt` is expired; one second earlier is valid.
#[actix_rt::test]
async fn test_expiry_boundary() {
    let store = seeded_store().await;

    let at_expiry = create_test_app(store.clone(), ADMIN_SECRET, 1700).await;
    let out = get(&at_expiry, "/account/whoami", None, Some(USER_TOKEN)).await;
    assert!(out.is_unauthorized_redirect());

    let before_expiry = create_test_app(store, ADMIN_SECRET, 1699).await;
    let out = get(&before_expiry, "/account/whoami", None, Some(USER_TOKEN)).await;
    assert_eq!(out.status, 200);
}

/// Admin-role sessions pass the admin guard; the header identity passes the
/// general guard too.
#[actix_rt::test]
async fn test_role_gate() {
    let store = seeded_store().await;
    let app = create_test_app(store, ADMIN_SECRET, 1500).await;

    let out = get(&app, "/admin/whoami", None, Some(ADMIN_TOKEN)).await;
    assert_eq!(out.status, 200);
    assert_eq!(out.json()["id"], "u2");

    let out = get(&app, "/account/whoami", Some(ADMIN_SECRET), None).await;
    assert_eq!(out.status, 200);
    assert_eq!(out.json()["role"], "admin");
}

/// Repeating a denied request yields the same redirect and writes nothing.
#[actix_rt::test]
async fn test_idempotent_denial() {
    let store = seeded_store().await;
    let app = create_test_app(store.clone(), ADMIN_SECRET, 1800).await;
    let entries_before = store.inner.len().await;

    let first = get(&app, "/admin/whoami", Some("wrong"), Some(USER_TOKEN)).await;
    for _ in 0..5 {
        let again = get(&app, "/admin/whoami", Some("wrong"), Some(USER_TOKEN)).await;
        assert_eq!(again, first);
    }

    assert!(first.is_unauthorized_redirect());
    assert_eq!(store.writes(), 0);
    assert_eq!(store.inner.len().await, entries_before);
}

/// Every denial cause produces a byte-identical response.
#[actix_rt::test]
async fn test_denials_are_indistinguishable() {
    let store = seeded_store().await;
    let app = create_test_app(store, ADMIN_SECRET, 1500).await;

    let wrong_role = get(&app, "/admin/whoami", None, Some(USER_TOKEN)).await;
    let no_session = get(&app, "/admin/whoami", None, None).await;
    let unknown = get(&app, "/admin/whoami", None, Some("unknown-token")).await;
    let malformed = get(&app, "/admin/whoami", None, Some(GARBAGE_TOKEN)).await;

    assert!(wrong_role.is_unauthorized_redirect());
    assert_eq!(no_session, wrong_role);
    assert_eq!(unknown, wrong_role);
    assert_eq!(malformed, wrong_role);
}
