//! Integration tests for session resolution and RPC transport.

mod helpers;

use http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_missing_cookie_is_anonymous() {
    let app = TestApp::new().await;

    let response = app.call("account.me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNAUTHORIZED");
    assert_eq!(response.body["error"]["data"]["redirect"], "/login");
    assert_eq!(response.body["error"]["data"]["path"], "account.me");
    assert_eq!(response.body["error"]["data"]["httpStatus"], 401);
}

#[tokio::test]
async fn test_unknown_token_is_anonymous() {
    let app = TestApp::new().await;

    let response = app
        .call("account.me", None, Some("does-not-exist.c2ln"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_session_is_anonymous() {
    let app = TestApp::new().await;
    let cookie = app.expired_session("usr_1").await;

    let response = app.call("account.me", None, Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signed_cookie_resolves_identity() {
    let app = TestApp::new().await;
    let cookie = app.sign_in("usr_1", None).await;

    let response = app.call("account.me", None, Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["id"], "usr_1");
    assert_eq!(response.data()["email"], "usr_1@example.com");
}

#[tokio::test]
async fn test_unsigned_cookie_resolves_identity() {
    let app = TestApp::new().await;
    let cookie = app.sign_in("usr_2", None).await;
    let (token, _signature) = cookie.rsplit_once('.').unwrap();

    let response = app.call("account.me", None, Some(token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["id"], "usr_2");
}

#[tokio::test]
async fn test_public_procedure_allows_anonymous() {
    let app = TestApp::new().await;

    let response = app.call("health.ping", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data(), "pong");
}

#[tokio::test]
async fn test_get_transport() {
    let app = TestApp::new().await;
    let cookie = app.sign_in("usr_1", None).await;

    let response = app
        .request("GET", "/rpc/account.me?input=null", String::new(), Some(&cookie), &[])
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["id"], "usr_1");
}

#[tokio::test]
async fn test_unknown_procedure_is_not_found() {
    let app = TestApp::new().await;

    let response = app.call("nope.missing", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/rpc/health.ping", "{not json".to_string(), None, &[])
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "BAD_REQUEST");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/health", String::new(), None, &[]).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["cache"], "connected");
    assert_eq!(response.body["cacheBackend"], "memory");
}
