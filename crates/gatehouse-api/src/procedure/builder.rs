//! Assembles the procedure bundles handed to route handlers.

use std::collections::HashMap;
use std::sync::Arc;

use gatehouse_auth::organization::OrganizationStore;
use gatehouse_auth::ratelimit::{LimiterFactory, RateLimitRule};
use gatehouse_auth::turnstile::BotVerifier;
use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_core::runtime::RuntimeConfigProvider;

use crate::context::{AccountContext, OrganizationContext, ProcedureContext};

use super::auth::AuthenticationGate;
use super::enterprise::FeatureFlagGate;
use super::gate::{Chain, Gate, Passthrough};
use super::organization::MembershipGate;
use super::rate_limit::RateLimitGate;
use super::turnstile::BotVerificationGate;

/// A composed gate chain starting from the base context.
pub type Procedure<O> = Arc<dyn Gate<ProcedureContext, Output = O>>;

/// Collaborators the gates are constructed with.
#[derive(Debug, Clone)]
pub struct ProcedureDeps {
    /// Per-call runtime flags.
    pub runtime: Arc<dyn RuntimeConfigProvider>,
    /// Bot-verification backend.
    pub verifier: Arc<dyn BotVerifier>,
    /// Lookup for the selected organization.
    pub organizations: Arc<dyn OrganizationStore>,
    /// Redirect hint attached to authentication failures.
    pub sign_in_path: String,
}

/// The procedure kinds, built once at startup.
#[derive(Clone)]
pub struct Procedures {
    /// No gates.
    pub public: Procedure<ProcedureContext>,
    /// Authentication.
    pub account: Procedure<AccountContext>,
    /// Authentication, then organization membership.
    pub organization: Procedure<OrganizationContext>,
    /// Organization chain, then the enterprise feature flag.
    pub enterprise: Procedure<OrganizationContext>,
    rate_limited: HashMap<String, Procedure<ProcedureContext>>,
}

impl Procedures {
    /// Builds every bundle. One rate-limited procedure is created per rule,
    /// each with its own limiter.
    pub fn build(
        deps: &ProcedureDeps,
        rules: &[RateLimitRule],
        limiters: &dyn LimiterFactory,
    ) -> Self {
        let account: Procedure<AccountContext> =
            Arc::new(AuthenticationGate::new(deps.sign_in_path.clone()));
        let organization: Procedure<OrganizationContext> =
            Arc::new(Chain::new(
            account.clone(),
            MembershipGate::new(deps.organizations.clone()),
        ));
        let enterprise: Procedure<OrganizationContext> = Arc::new(Chain::new(
            organization.clone(),
            FeatureFlagGate::new(deps.runtime.clone()),
        ));

        let verification = Arc::new(BotVerificationGate::new(
            deps.runtime.clone(),
            deps.verifier.clone(),
        ));
        let rate_limited = rules
            .iter()
            .map(|rule| {
                let procedure: Procedure<ProcedureContext> = Arc::new(Chain::new(
                    verification.clone(),
                    RateLimitGate::new(limiters.build(rule)),
                ));
                (rule.name.clone(), procedure)
            })
            .collect();

        Self {
            public: Arc::new(Passthrough),
            account,
            organization,
            enterprise,
            rate_limited,
        }
    }

    /// Returns the rate-limited procedure for a route in the table.
    pub fn public_rate_limited(&self, name: &str) -> AppResult<Procedure<ProcedureContext>> {
        self.rate_limited.get(name).cloned().ok_or_else(|| {
            AppError::configuration(format!("No rate limit configured for route '{name}'"))
        })
    }

    /// Names of all rate-limited routes.
    pub fn rate_limited_routes(&self) -> impl Iterator<Item = &str> {
        self.rate_limited.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for Procedures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut routes: Vec<_> = self.rate_limited_routes().collect();
        routes.sort_unstable();
        f.debug_struct("Procedures")
            .field("rate_limited", &routes)
            .finish_non_exhaustive()
    }
}
