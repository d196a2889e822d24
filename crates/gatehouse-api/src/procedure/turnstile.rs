//! Bot-verification gate.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use gatehouse_auth::turnstile::BotVerifier;
use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_core::runtime::RuntimeConfigProvider;

use crate::context::ProcedureContext;

use super::gate::{Call, Gate};

/// Input field carrying the challenge response token.
pub const VERIFICATION_TOKEN_FIELD: &str = "turnstileToken";

/// Verifies the caller's challenge token before a public route runs.
///
/// | secret | token | mode        | result                     |
/// |--------|-------|-------------|----------------------------|
/// | unset  | any   | any         | forward                    |
/// | set    | none  | development | forward                    |
/// | set    | none  | other       | `FORBIDDEN`                |
/// | set    | some  | any         | verify; reject failures with `BAD_REQUEST` |
#[derive(Debug, Clone)]
pub struct BotVerificationGate {
    runtime: Arc<dyn RuntimeConfigProvider>,
    verifier: Arc<dyn BotVerifier>,
}

impl BotVerificationGate {
    /// Creates the gate.
    pub fn new(runtime: Arc<dyn RuntimeConfigProvider>, verifier: Arc<dyn BotVerifier>) -> Self {
        Self { runtime, verifier }
    }
}

#[async_trait]
impl Gate<ProcedureContext> for BotVerificationGate {
    type Output = ProcedureContext;

    async fn apply(&self, ctx: ProcedureContext, call: &Call) -> AppResult<ProcedureContext> {
        let settings = self.runtime.current().await;
        let Some(secret) = settings.turnstile_secret else {
            return Ok(ctx);
        };

        let Some(token) = call.input_str(VERIFICATION_TOKEN_FIELD) else {
            if settings.environment.is_development() {
                info!(path = %call.path, "Skipping bot verification in development");
                return Ok(ctx);
            }
            debug!(path = %call.path, "Rejected call without verification token");
            return Err(AppError::forbidden("Verification token is required"));
        };

        let remote_ip = ctx.event.client_ip();
        let verdict = self
            .verifier
            .verify(token, &secret, remote_ip.as_deref())
            .await?;

        if !verdict.success {
            debug!(
                path = %call.path,
                error_codes = ?verdict.error_codes,
                "Rejected call with failed verification"
            );
            return Err(AppError::bad_request("Verification failed"));
        }

        Ok(ctx)
    }
}
