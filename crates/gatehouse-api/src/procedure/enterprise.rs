//! Enterprise feature flag gate.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_core::runtime::RuntimeConfigProvider;

use crate::context::OrganizationContext;

use super::gate::{Call, Gate};

/// Rejects calls while enterprise features are disabled.
///
/// The flag is read on every call.
#[derive(Debug, Clone)]
pub struct FeatureFlagGate {
    runtime: Arc<dyn RuntimeConfigProvider>,
}

impl FeatureFlagGate {
    /// Creates the gate.
    pub fn new(runtime: Arc<dyn RuntimeConfigProvider>) -> Self {
        Self { runtime }
    }
}

#[async_trait]
impl Gate<OrganizationContext> for FeatureFlagGate {
    type Output = OrganizationContext;

    async fn apply(&self, ctx: OrganizationContext, call: &Call) -> AppResult<OrganizationContext> {
        if !self.runtime.enterprise_enabled().await {
            debug!(path = %call.path, "Rejected call while enterprise features are disabled");
            return Err(AppError::precondition_failed(
                "Enterprise features are not enabled",
            ));
        }
        Ok(ctx)
    }
}
