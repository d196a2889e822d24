//! Per-route rate limit gate.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use gatehouse_auth::ratelimit::RateLimiter;
use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;

use crate::context::ProcedureContext;

use super::gate::{Call, Gate};

/// Bucket shared by every caller whose IP cannot be determined.
pub const UNKNOWN_IP: &str = "unknown";

/// Consumes one call from the route's quota, keyed by caller IP.
#[derive(Debug, Clone)]
pub struct RateLimitGate {
    limiter: Arc<dyn RateLimiter>,
}

impl RateLimitGate {
    /// Creates the gate over a route-bound limiter.
    pub fn new(limiter: Arc<dyn RateLimiter>) -> Self {
        Self { limiter }
    }
}

#[async_trait]
impl Gate<ProcedureContext> for RateLimitGate {
    type Output = ProcedureContext;

    async fn apply(&self, ctx: ProcedureContext, call: &Call) -> AppResult<ProcedureContext> {
        let ip = ctx
            .event
            .client_ip()
            .unwrap_or_else(|| UNKNOWN_IP.to_string());

        let outcome = self.limiter.limit(&ip).await?;
        if !outcome.success {
            debug!(
                path = %call.path,
                namespace = %self.limiter.namespace(),
                ip = %ip,
                "Rate limit exceeded"
            );
            return Err(AppError::too_many_requests(
                "Too many requests, please try again later",
            ));
        }

        Ok(ctx)
    }
}
