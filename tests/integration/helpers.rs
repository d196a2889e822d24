//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use chrono::{Duration, Utc};
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use gatehouse_api::{AppDependencies, build_app};
use gatehouse_auth::organization::{CacheOrganizationStore, OrganizationStore};
use gatehouse_auth::ratelimit::{LimiterFactory, MemoryRateLimiter, RateLimitRule, RateLimiter};
use gatehouse_auth::session::CacheSessionStore;
use gatehouse_auth::turnstile::{BotVerifier, VerificationVerdict};
use gatehouse_cache::provider::CacheManager;
use gatehouse_core::config::{AppConfig, Environment};
use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_core::runtime::{RuntimeSettings, SharedRuntimeConfig};
use gatehouse_entity::identity::{AccountAttributes, SessionRecord};
use gatehouse_entity::organization::{Member, MemberRole, Organization};

/// Token the stub verifier accepts.
pub const VALID_TOKEN: &str = "valid-token";

/// Bot verifier double: accepts [`VALID_TOKEN`], rejects everything else,
/// or fails outright when marked unavailable.
#[derive(Debug, Default)]
pub struct StubVerifier {
    pub calls: AtomicUsize,
    pub unavailable: AtomicBool,
}

#[async_trait]
impl BotVerifier for StubVerifier {
    async fn verify(
        &self,
        token: &str,
        _secret: &str,
        _remote_ip: Option<&str>,
    ) -> AppResult<VerificationVerdict> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::external_service("verification API unreachable"));
        }
        Ok(VerificationVerdict {
            success: token == VALID_TOKEN,
            error_codes: if token == VALID_TOKEN {
                Vec::new()
            } else {
                vec!["invalid-input-response".to_string()]
            },
            hostname: None,
        })
    }
}

/// Organization store whose every lookup fails.
#[derive(Debug, Default)]
pub struct UnavailableOrganizations;

#[async_trait]
impl OrganizationStore for UnavailableOrganizations {
    async fn find_by_id(&self, _organization_id: &str) -> AppResult<Option<Organization>> {
        Err(AppError::cache("organization store unreachable"))
    }
}

/// Configures a [`TestApp`].
pub struct TestAppBuilder {
    settings: RuntimeSettings,
    limiters: Arc<dyn LimiterFactory>,
    organizations: Option<Arc<dyn OrganizationStore>>,
}

impl TestAppBuilder {
    /// Sets the bot-verification secret.
    pub fn turnstile_secret(mut self, secret: &str) -> Self {
        self.settings.turnstile_secret = Some(secret.to_string());
        self
    }

    /// Sets the runtime mode.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.settings.environment = environment;
        self
    }

    /// Enables enterprise procedures.
    pub fn enterprise(mut self, enabled: bool) -> Self {
        self.settings.enterprise_enabled = enabled;
        self
    }

    /// Replaces the limiter factory.
    pub fn limiters(mut self, limiters: Arc<dyn LimiterFactory>) -> Self {
        self.limiters = limiters;
        self
    }

    /// Replaces the organization store the app reads from.
    pub fn organizations(mut self, organizations: Arc<dyn OrganizationStore>) -> Self {
        self.organizations = Some(organizations);
        self
    }

    /// Builds the app over in-memory backends.
    pub async fn build(self) -> TestApp {
        let mut config = AppConfig::default();
        config.server.environment = self.settings.environment;

        let cache = Arc::new(
            CacheManager::new(&config.cache)
                .await
                .expect("Failed to init cache"),
        );
        let sessions = Arc::new(CacheSessionStore::new(Arc::clone(&cache)));
        let organizations = Arc::new(CacheOrganizationStore::new(Arc::clone(&cache)));
        let verifier = Arc::new(StubVerifier::default());
        let runtime = SharedRuntimeConfig::new(self.settings);
        let organization_lookup: Arc<dyn OrganizationStore> = match self.organizations {
            Some(store) => store,
            None => organizations.clone(),
        };

        let deps = AppDependencies {
            cache,
            sessions: sessions.clone(),
            organizations: organization_lookup,
            verifier: verifier.clone(),
            limiters: self.limiters,
            runtime: Arc::new(runtime.clone()),
        };
        let router = build_app(config.clone(), deps).expect("Failed to build app");

        TestApp {
            router,
            config,
            runtime,
            sessions,
            organizations,
            verifier,
        }
    }
}

/// Limiters that count in process memory.
pub fn memory_limiters() -> Arc<dyn LimiterFactory> {
    Arc::new(|rule: &RateLimitRule| -> Arc<dyn RateLimiter> {
        Arc::new(MemoryRateLimiter::new(rule))
    })
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Runtime flags, mutable while the app runs
    pub runtime: SharedRuntimeConfig,
    /// Session store backing the app
    pub sessions: Arc<CacheSessionStore>,
    /// Organization store backing the app
    pub organizations: Arc<CacheOrganizationStore>,
    /// Verifier double
    pub verifier: Arc<StubVerifier>,
}

impl TestApp {
    /// Starts configuring a test application.
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder {
            settings: RuntimeSettings {
                environment: Environment::Test,
                ..RuntimeSettings::default()
            },
            limiters: memory_limiters(),
            organizations: None,
        }
    }

    /// Create a new test application with default settings
    pub async fn new() -> Self {
        Self::builder().build().await
    }

    /// Stores a session for `user_id` and returns the cookie value.
    pub async fn sign_in(&self, user_id: &str, active_organization_id: Option<&str>) -> String {
        self.store_session(user_id, active_organization_id, Duration::hours(1))
            .await
    }

    /// Stores a session that has already expired and returns the cookie value.
    pub async fn expired_session(&self, user_id: &str) -> String {
        self.store_session(user_id, None, Duration::seconds(-60)).await
    }

    async fn store_session(
        &self,
        user_id: &str,
        active_organization_id: Option<&str>,
        lifetime: Duration,
    ) -> String {
        let now = Utc::now();
        let token = format!("tok-{user_id}-{}", now.timestamp_nanos_opt().unwrap_or_default());
        let record = SessionRecord {
            id: format!("sess-{user_id}"),
            token: token.clone(),
            user: AccountAttributes {
                id: user_id.to_string(),
                email: format!("{user_id}@example.com"),
                name: Some(format!("User {user_id}")),
                email_verified: true,
            },
            active_organization_id: active_organization_id.map(String::from),
            ip_address: None,
            user_agent: None,
            created_at: now - Duration::hours(2),
            expires_at: now + lifetime,
        };
        self.sessions
            .save(&record)
            .await
            .expect("Failed to store session");

        // Signed cookie format: `<token>.<signature>`
        format!("{token}.c2lnbmF0dXJl")
    }

    /// Stores an organization with `(member_id, user_id)` members.
    pub async fn create_organization(&self, id: &str, members: &[(&str, &str)]) {
        let organization = Organization {
            id: id.to_string(),
            name: format!("Org {id}"),
            slug: id.to_string(),
            members: members
                .iter()
                .map(|&(member_id, user_id)| Member {
                    id: member_id.to_string(),
                    user_id: user_id.to_string(),
                    role: MemberRole::Member,
                    created_at: Utc::now(),
                })
                .collect(),
        };
        self.organizations
            .save(&organization)
            .await
            .expect("Failed to store organization");
    }

    /// Calls a procedure over POST.
    pub async fn call(&self, procedure: &str, input: Option<Value>, session: Option<&str>) -> TestResponse {
        self.call_with_headers(procedure, input, session, &[]).await
    }

    /// Calls a procedure over POST with extra headers.
    pub async fn call_with_headers(
        &self,
        procedure: &str,
        input: Option<Value>,
        session: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body = input
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.request("POST", &format!("/rpc/{procedure}"), body, session, headers)
            .await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: String,
        session: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json");

        if let Some(session) = session {
            req = req.header(
                "Cookie",
                format!("{}={}", self.config.session.cookie_name, session),
            );
        }
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// `result.data` of a successful call.
    pub fn data(&self) -> &Value {
        &self.body["result"]["data"]
    }

    /// `error.code` of a failed call.
    pub fn error_code(&self) -> &str {
        self.body["error"]["code"].as_str().unwrap_or_default()
    }
}

/// A valid `contact.submit` input.
pub fn contact_input(token: Option<&str>) -> Value {
    let mut input = serde_json::json!({
        "name": "Ada",
        "email": "ada@example.com",
        "message": "Hello there",
    });
    if let Some(token) = token {
        input["turnstileToken"] = Value::String(token.to_string());
    }
    input
}
