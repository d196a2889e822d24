//! Limiter used when no quota service is configured.

use async_trait::async_trait;

use gatehouse_core::result::AppResult;

use super::limiter::{RateLimitOutcome, RateLimitRule, RateLimiter};

/// Always allows the call.
#[derive(Debug, Clone)]
pub struct NoopRateLimiter {
    namespace: String,
    limit: u32,
}

impl NoopRateLimiter {
    /// Creates a no-op limiter for a route.
    pub fn new(rule: &RateLimitRule) -> Self {
        Self {
            namespace: rule.namespace(),
            limit: rule.limit,
        }
    }
}

#[async_trait]
impl RateLimiter for NoopRateLimiter {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn limit(&self, _identifier: &str) -> AppResult<RateLimitOutcome> {
        Ok(RateLimitOutcome::unlimited(self.limit))
    }
}
