//! Integration tests for the account, organization and enterprise procedures.

mod helpers;

use std::sync::Arc;

use http::StatusCode;

use helpers::{TestApp, UnavailableOrganizations};

#[tokio::test]
async fn test_no_selected_organization_is_bad_request() {
    let app = TestApp::new().await;
    let cookie = app.sign_in("usr_1", None).await;

    let response = app.call("organization.get", None, Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "BAD_REQUEST");
}

#[tokio::test]
async fn test_unknown_organization_is_treated_as_unselected() {
    let app = TestApp::new().await;
    let cookie = app.sign_in("usr_1", Some("org_missing")).await;

    let response = app.call("organization.get", None, Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_member_is_unauthorized() {
    let app = TestApp::new().await;
    app.create_organization("org_1", &[("mem_1", "usr_other")])
        .await;
    let cookie = app.sign_in("usr_1", Some("org_1")).await;

    let response = app.call("organization.get", None, Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_member_gets_member_id() {
    let app = TestApp::new().await;
    app.create_organization("org_1", &[("mem_0", "usr_0"), ("mem_1", "usr_1")])
        .await;
    let cookie = app.sign_in("usr_1", Some("org_1")).await;

    let response = app.call("organization.get", None, Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["id"], "org_1");
    assert_eq!(response.data()["memberId"], "mem_1");
    assert_eq!(response.data()["memberCount"], 2);
}

#[tokio::test]
async fn test_organization_header_overrides_session() {
    let app = TestApp::new().await;
    app.create_organization("org_a", &[("mem_a", "usr_1")]).await;
    app.create_organization("org_b", &[("mem_b", "usr_1")]).await;
    let cookie = app.sign_in("usr_1", Some("org_a")).await;

    let response = app
        .call_with_headers(
            "organization.get",
            None,
            Some(&cookie),
            &[("x-organization-id", "org_b")],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["memberId"], "mem_b");
}

#[tokio::test]
async fn test_organization_members() {
    let app = TestApp::new().await;
    app.create_organization("org_1", &[("mem_0", "usr_0"), ("mem_1", "usr_1")])
        .await;
    let cookie = app.sign_in("usr_1", Some("org_1")).await;

    let response = app
        .call("organization.members", None, Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let members = response.data().as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0]["userId"], "usr_0");
}

#[tokio::test]
async fn test_anonymous_organization_call_is_unauthorized() {
    let app = TestApp::new().await;
    app.create_organization("org_1", &[("mem_1", "usr_1")]).await;

    let response = app
        .call_with_headers("organization.get", None, None, &[("x-organization-id", "org_1")])
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_enterprise_flag_rejects_only_at_last_stage() {
    let app = TestApp::new().await;
    app.create_organization("org_1", &[("mem_1", "usr_1")]).await;
    let member = app.sign_in("usr_1", Some("org_1")).await;
    let outsider = app.sign_in("usr_2", Some("org_1")).await;

    // Earlier stages fail the same way whatever the flag says.
    for enabled in [false, true] {
        app.runtime.update(|s| s.enterprise_enabled = enabled).await;

        let anonymous = app.call("enterprise.auditSettings", None, None).await;
        assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

        let non_member = app
            .call("enterprise.auditSettings", None, Some(&outsider))
            .await;
        assert_eq!(non_member.status, StatusCode::UNAUTHORIZED);
    }

    app.runtime.update(|s| s.enterprise_enabled = false).await;
    let disabled = app
        .call("enterprise.auditSettings", None, Some(&member))
        .await;
    assert_eq!(disabled.status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(disabled.error_code(), "PRECONDITION_FAILED");

    app.runtime.update(|s| s.enterprise_enabled = true).await;
    let enabled = app
        .call("enterprise.auditSettings", None, Some(&member))
        .await;
    assert_eq!(enabled.status, StatusCode::OK);
    assert_eq!(enabled.data()["organizationId"], "org_1");
}

#[tokio::test]
async fn test_enterprise_enabled_at_build() {
    let app = TestApp::builder().enterprise(true).build().await;
    app.create_organization("org_1", &[("mem_1", "usr_1")]).await;
    let cookie = app.sign_in("usr_1", Some("org_1")).await;

    let response = app
        .call("enterprise.auditSettings", None, Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_organization_store_outage_spares_other_procedures() {
    let app = TestApp::builder()
        .organizations(Arc::new(UnavailableOrganizations))
        .build()
        .await;
    let cookie = app.sign_in("usr_1", Some("org_1")).await;

    let me = app.call("account.me", None, Some(&cookie)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["id"], "usr_1");

    let ping = app.call("health.ping", None, Some(&cookie)).await;
    assert_eq!(ping.status, StatusCode::OK);
    assert_eq!(*ping.data(), "pong");

    let org = app.call("organization.get", None, Some(&cookie)).await;
    assert_eq!(org.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(org.error_code(), "SERVICE_UNAVAILABLE");
}
