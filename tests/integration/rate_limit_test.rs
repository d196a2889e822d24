//! Integration tests for per-route rate limiting.

mod helpers;

use std::sync::Arc;

use http::StatusCode;

use gatehouse_auth::ratelimit::{NoopRateLimiter, RateLimitRule, RateLimiter, RemoteRateLimiter};
use gatehouse_core::config::RateLimitConfig;

use helpers::{TestApp, contact_input};

#[tokio::test]
async fn test_call_after_limit_is_rejected() {
    let app = TestApp::new().await;
    let ip = [("x-forwarded-for", "203.0.113.7")];

    // contact.submit allows 5 calls per minute
    for _ in 0..5 {
        let response = app
            .call_with_headers("contact.submit", Some(contact_input(None)), None, &ip)
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = app
        .call_with_headers("contact.submit", Some(contact_input(None)), None, &ip)
        .await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.error_code(), "TOO_MANY_REQUESTS");
}

#[tokio::test]
async fn test_buckets_are_per_ip_and_per_route() {
    let app = TestApp::new().await;
    let input = serde_json::json!({ "email": "ada@example.com" });

    // waitlist.join allows 3 calls per minute
    for _ in 0..3 {
        let response = app
            .call_with_headers(
                "waitlist.join",
                Some(input.clone()),
                None,
                &[("x-forwarded-for", "198.51.100.1")],
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }
    let blocked = app
        .call_with_headers(
            "waitlist.join",
            Some(input.clone()),
            None,
            &[("x-forwarded-for", "198.51.100.1")],
        )
        .await;
    assert_eq!(blocked.status, StatusCode::TOO_MANY_REQUESTS);

    let other_ip = app
        .call_with_headers(
            "waitlist.join",
            Some(input.clone()),
            None,
            &[("x-real-ip", "198.51.100.2")],
        )
        .await;
    assert_eq!(other_ip.status, StatusCode::OK);

    let other_route = app
        .call_with_headers(
            "contact.submit",
            Some(contact_input(None)),
            None,
            &[("x-forwarded-for", "198.51.100.1")],
        )
        .await;
    assert_eq!(other_route.status, StatusCode::OK);
}

#[tokio::test]
async fn test_callers_without_ip_share_one_bucket() {
    let app = TestApp::new().await;
    let input = serde_json::json!({ "email": "ada@example.com" });

    for _ in 0..3 {
        let response = app.call("waitlist.join", Some(input.clone()), None).await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = app.call("waitlist.join", Some(input), None).await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_unconfigured_limiter_never_rejects() {
    let app = TestApp::builder()
        .limiters(Arc::new(|rule: &RateLimitRule| -> Arc<dyn RateLimiter> {
            Arc::new(NoopRateLimiter::new(rule))
        }))
        .build()
        .await;

    for _ in 0..20 {
        let response = app
            .call("contact.submit", Some(contact_input(None)), None)
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_rejected_verification_does_not_consume_quota() {
    let app = TestApp::builder().turnstile_secret("secret").build().await;
    let ip = [("x-forwarded-for", "192.0.2.10")];

    for _ in 0..10 {
        let response = app
            .call_with_headers("contact.submit", Some(contact_input(Some("wrong"))), None, &ip)
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    let response = app
        .call_with_headers(
            "contact.submit",
            Some(contact_input(Some(helpers::VALID_TOKEN))),
            None,
            &ip,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_limiter_outage_is_service_unavailable() {
    // Nothing listens on port 1; every limit check fails to connect.
    let config = RateLimitConfig {
        api_url: "http://127.0.0.1:1/v1/ratelimits.limit".to_string(),
        timeout_seconds: 2,
        ..RateLimitConfig::default()
    };
    let app = TestApp::builder()
        .limiters(Arc::new(move |rule: &RateLimitRule| -> Arc<dyn RateLimiter> {
            Arc::new(
                RemoteRateLimiter::new(&config, "root-key", rule)
                    .expect("Failed to build remote limiter"),
            )
        }))
        .build()
        .await;

    let response = app
        .call("contact.submit", Some(contact_input(None)), None)
        .await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.error_code(), "SERVICE_UNAVAILABLE");
    assert_eq!(response.body["error"]["data"]["path"], "contact.submit");
}
