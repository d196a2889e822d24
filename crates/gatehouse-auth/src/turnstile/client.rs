//! Cloudflare Turnstile siteverify client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use gatehouse_core::config::TurnstileConfig;
use gatehouse_core::error::{AppError, ErrorKind};
use gatehouse_core::result::AppResult;

/// Outcome of a challenge verification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerificationVerdict {
    /// Whether the challenge response was accepted.
    pub success: bool,
    /// Error codes reported by the verifier.
    #[serde(rename = "error-codes", default)]
    pub error_codes: Vec<String>,
    /// Hostname the challenge was solved on.
    #[serde(default)]
    pub hostname: Option<String>,
}

/// Verifies challenge response tokens against an external service.
#[async_trait]
pub trait BotVerifier: Send + Sync + std::fmt::Debug + 'static {
    /// Verifies `token` using the server-side `secret`.
    async fn verify(
        &self,
        token: &str,
        secret: &str,
        remote_ip: Option<&str>,
    ) -> AppResult<VerificationVerdict>;
}

#[derive(Debug, Serialize)]
struct SiteverifyRequest<'a> {
    secret: &'a str,
    response: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    remoteip: Option<&'a str>,
}

/// HTTP client for the Turnstile siteverify endpoint.
#[derive(Debug, Clone)]
pub struct TurnstileClient {
    http: reqwest::Client,
    verify_url: String,
}

impl TurnstileClient {
    /// Creates a client from configuration.
    pub fn new(config: &TurnstileConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            http,
            verify_url: config.verify_url.clone(),
        })
    }
}

#[async_trait]
impl BotVerifier for TurnstileClient {
    async fn verify(
        &self,
        token: &str,
        secret: &str,
        remote_ip: Option<&str>,
    ) -> AppResult<VerificationVerdict> {
        let body = SiteverifyRequest {
            secret,
            response: token,
            remoteip: remote_ip,
        };

        let response = self
            .http
            .post(&self.verify_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Bot verification request failed", e)
            })?;

        if !response.status().is_success() {
            return Err(AppError::external_service(format!(
                "Bot verification returned HTTP {}",
                response.status()
            )));
        }

        let verdict: VerificationVerdict = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Bot verification returned an unreadable body",
                e,
            )
        })?;

        debug!(
            success = verdict.success,
            error_codes = ?verdict.error_codes,
            "Bot verification verdict"
        );
        Ok(verdict)
    }
}
