//! Rate limiter trait and per-route rules.

use std::time::Duration;

use async_trait::async_trait;

use gatehouse_core::result::AppResult;

/// Quota declared by a public rate-limited route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitRule {
    /// Route name, e.g. `contact.submit`.
    pub name: String,
    /// Calls allowed per window.
    pub limit: u32,
    /// Window length.
    pub duration: Duration,
}

impl RateLimitRule {
    /// Creates a rule.
    pub fn new(name: impl Into<String>, limit: u32, duration: Duration) -> Self {
        Self {
            name: name.into(),
            limit,
            duration,
        }
    }

    /// Quota bucket namespace for the route.
    pub fn namespace(&self) -> String {
        format!("public.{}", self.name)
    }
}

/// Verdict for one limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitOutcome {
    /// Whether the call is within quota.
    pub success: bool,
    /// Calls allowed per window.
    pub limit: u32,
    /// Calls left in the current window.
    pub remaining: u32,
}

impl RateLimitOutcome {
    /// An outcome that lets the call through without consuming quota.
    pub fn unlimited(limit: u32) -> Self {
        Self {
            success: true,
            limit,
            remaining: limit,
        }
    }
}

/// A limiter bound to one (namespace, limit, window).
#[async_trait]
pub trait RateLimiter: Send + Sync + std::fmt::Debug + 'static {
    /// Namespace this limiter counts in.
    fn namespace(&self) -> &str;

    /// Consumes one call for `identifier` and reports whether it is allowed.
    async fn limit(&self, identifier: &str) -> AppResult<RateLimitOutcome>;
}
