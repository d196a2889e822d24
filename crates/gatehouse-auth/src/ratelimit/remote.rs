//! Limiter backed by a remote quota service.
//!
//! Speaks the Unkey `ratelimits.limit` API: one POST per call carrying the
//! namespace, identifier, limit and window, authenticated with the root key.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use gatehouse_core::config::RateLimitConfig;
use gatehouse_core::error::{AppError, ErrorKind};
use gatehouse_core::result::AppResult;

use super::limiter::{RateLimitOutcome, RateLimitRule, RateLimiter};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LimitRequest<'a> {
    namespace: &'a str,
    identifier: &'a str,
    limit: u32,
    /// Window in milliseconds.
    duration: u64,
}

#[derive(Debug, Deserialize)]
struct LimitResponse {
    success: bool,
    limit: u32,
    remaining: u32,
}

/// Limiter that asks the remote quota service on every call.
#[derive(Debug, Clone)]
pub struct RemoteRateLimiter {
    http: reqwest::Client,
    api_url: String,
    root_key: String,
    namespace: String,
    limit: u32,
    duration: Duration,
}

impl RemoteRateLimiter {
    /// Creates a limiter for a route.
    pub fn new(config: &RateLimitConfig, root_key: &str, rule: &RateLimitRule) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            root_key: root_key.to_string(),
            namespace: rule.namespace(),
            limit: rule.limit,
            duration: rule.duration,
        })
    }
}

#[async_trait]
impl RateLimiter for RemoteRateLimiter {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn limit(&self, identifier: &str) -> AppResult<RateLimitOutcome> {
        let body = LimitRequest {
            namespace: &self.namespace,
            identifier,
            limit: self.limit,
            duration: self.duration.as_millis() as u64,
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.root_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Rate limit request failed", e)
            })?;

        if !response.status().is_success() {
            return Err(AppError::external_service(format!(
                "Rate limit service returned HTTP {}",
                response.status()
            )));
        }

        let parsed: LimitResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Rate limit service returned an unreadable body",
                e,
            )
        })?;

        debug!(
            namespace = %self.namespace,
            success = parsed.success,
            remaining = parsed.remaining,
            "Remote rate limit checked"
        );

        Ok(RateLimitOutcome {
            success: parsed.success,
            limit: parsed.limit,
            remaining: parsed.remaining,
        })
    }
}
