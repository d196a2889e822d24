//! Builds the limiter for each rate-limited route at startup.

use std::sync::Arc;

use tracing::{info, warn};

use gatehouse_core::config::{RateLimitBackend, RateLimitConfig};

use super::limiter::{RateLimitRule, RateLimiter};
use super::memory::MemoryRateLimiter;
use super::noop::NoopRateLimiter;
use super::remote::RemoteRateLimiter;

/// Produces one limiter per route rule.
pub trait LimiterFactory: Send + Sync {
    /// Builds the limiter bound to `rule`.
    fn build(&self, rule: &RateLimitRule) -> Arc<dyn RateLimiter>;
}

impl<F> LimiterFactory for F
where
    F: Fn(&RateLimitRule) -> Arc<dyn RateLimiter> + Send + Sync,
{
    fn build(&self, rule: &RateLimitRule) -> Arc<dyn RateLimiter> {
        self(rule)
    }
}

/// Chooses the limiter from configuration.
///
/// With the remote backend, a configured root key yields a
/// [`RemoteRateLimiter`]; without one every route gets a
/// [`NoopRateLimiter`] so missing ops configuration never blocks traffic.
#[derive(Debug, Clone)]
pub struct ConfiguredLimiterFactory {
    config: RateLimitConfig,
    root_key: Option<String>,
}

impl ConfiguredLimiterFactory {
    /// Creates a factory. `root_key` is the credential in effect at startup.
    pub fn new(config: RateLimitConfig, root_key: Option<String>) -> Self {
        Self { config, root_key }
    }
}

impl LimiterFactory for ConfiguredLimiterFactory {
    fn build(&self, rule: &RateLimitRule) -> Arc<dyn RateLimiter> {
        match (self.config.backend, self.root_key.as_deref()) {
            (RateLimitBackend::Memory, _) => {
                info!(namespace = %rule.namespace(), "Using in-memory rate limiter");
                Arc::new(MemoryRateLimiter::new(rule))
            }
            (RateLimitBackend::Remote, Some(root_key)) => {
                match RemoteRateLimiter::new(&self.config, root_key, rule) {
                    Ok(limiter) => Arc::new(limiter),
                    Err(e) => {
                        warn!(
                            namespace = %rule.namespace(),
                            error = %e,
                            "Remote rate limiter unavailable, falling back to no-op"
                        );
                        Arc::new(NoopRateLimiter::new(rule))
                    }
                }
            }
            (RateLimitBackend::Remote, None) => {
                warn!(
                    namespace = %rule.namespace(),
                    "No rate limit root key configured, route is not rate limited"
                );
                Arc::new(NoopRateLimiter::new(rule))
            }
        }
    }
}
