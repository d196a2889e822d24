//! Integration tests for bot verification on public routes.

mod helpers;

use std::sync::atomic::Ordering;

use http::StatusCode;

use gatehouse_core::config::Environment;

use helpers::{TestApp, VALID_TOKEN, contact_input};

#[tokio::test]
async fn test_no_secret_skips_verification() {
    let app = TestApp::builder()
        .environment(Environment::Production)
        .build()
        .await;

    for token in [None, Some("garbage"), Some(VALID_TOKEN)] {
        let response = app
            .call("contact.submit", Some(contact_input(token)), None)
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }
    assert_eq!(app.verifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_token_in_development_passes() {
    let app = TestApp::builder()
        .turnstile_secret("secret")
        .environment(Environment::Development)
        .build()
        .await;

    let response = app
        .call("contact.submit", Some(contact_input(None)), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.verifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_token_outside_development_is_forbidden() {
    let app = TestApp::builder()
        .turnstile_secret("secret")
        .environment(Environment::Production)
        .build()
        .await;

    let response = app
        .call("contact.submit", Some(contact_input(None)), None)
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "FORBIDDEN");
}

#[tokio::test]
async fn test_invalid_token_is_bad_request() {
    let app = TestApp::builder().turnstile_secret("secret").build().await;

    let response = app
        .call("contact.submit", Some(contact_input(Some("garbage"))), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["message"], "Verification failed");
    assert_eq!(app.verifier.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_valid_token_passes() {
    let app = TestApp::builder().turnstile_secret("secret").build().await;

    let response = app
        .call("auth.signUp", Some(serde_json::json!({
            "email": "ada@example.com",
            "name": "Ada",
            "password": "correct horse",
            "turnstileToken": VALID_TOKEN,
        })), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["accepted"], true);
}

#[tokio::test]
async fn test_verifier_outage_is_service_unavailable() {
    let app = TestApp::builder().turnstile_secret("secret").build().await;
    app.verifier.unavailable.store(true, Ordering::SeqCst);

    let response = app
        .call("contact.submit", Some(contact_input(Some(VALID_TOKEN))), None)
        .await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.error_code(), "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn test_gate_runs_before_input_validation() {
    let app = TestApp::builder()
        .turnstile_secret("secret")
        .environment(Environment::Production)
        .build()
        .await;

    let response = app
        .call("auth.requestPasswordReset", Some(serde_json::json!({ "unexpected": 1 })), None)
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_secret_added_at_runtime_takes_effect() {
    let app = TestApp::builder()
        .environment(Environment::Production)
        .build()
        .await;

    let before = app
        .call("contact.submit", Some(contact_input(None)), None)
        .await;
    assert_eq!(before.status, StatusCode::OK);

    app.runtime
        .update(|s| s.turnstile_secret = Some("secret".to_string()))
        .await;

    let after = app
        .call("contact.submit", Some(contact_input(None)), None)
        .await;
    assert_eq!(after.status, StatusCode::FORBIDDEN);
}
