//! Bot-verification and rate limiter configuration.

use serde::{Deserialize, Serialize};

/// Cloudflare Turnstile settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnstileConfig {
    /// Server-side secret. When unset, bot verification is disabled.
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Siteverify endpoint.
    #[serde(default = "default_verify_url")]
    pub verify_url: String,
    /// Outbound request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for TurnstileConfig {
    fn default() -> Self {
        Self {
            secret_key: None,
            verify_url: default_verify_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Which limiter implementation backs public rate-limited routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateLimitBackend {
    /// Remote quota service; a no-op limiter when no root key is set.
    #[default]
    Remote,
    /// In-process fixed window counters (single instance deployments).
    Memory,
}

/// Rate limiter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Root key for the remote quota service.
    #[serde(default)]
    pub root_key: Option<String>,
    /// Remote quota service endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Limiter implementation.
    #[serde(default)]
    pub backend: RateLimitBackend,
    /// Outbound request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            root_key: None,
            api_url: default_api_url(),
            backend: RateLimitBackend::default(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_verify_url() -> String {
    "https://challenges.cloudflare.com/turnstile/v0/siteverify".to_string()
}

fn default_api_url() -> String {
    "https://api.unkey.dev/v1/ratelimits.limit".to_string()
}

fn default_timeout() -> u64 {
    10
}
