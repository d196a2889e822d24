//! Authentication gate.

use async_trait::async_trait;
use tracing::debug;

use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;

use crate::context::{AccountContext, ProcedureContext};

use super::gate::{Call, Gate};

/// Requires a resolved identity with an account id.
///
/// Forwards an [`AccountContext`], so downstream gates and handlers never
/// see an anonymous caller.
#[derive(Debug, Clone)]
pub struct AuthenticationGate {
    sign_in_path: String,
}

impl AuthenticationGate {
    /// Creates the gate. Rejections point the client at `sign_in_path`.
    pub fn new(sign_in_path: impl Into<String>) -> Self {
        Self {
            sign_in_path: sign_in_path.into(),
        }
    }
}

#[async_trait]
impl Gate<ProcedureContext> for AuthenticationGate {
    type Output = AccountContext;

    async fn apply(&self, ctx: ProcedureContext, call: &Call) -> AppResult<AccountContext> {
        match ctx.identity {
            Some(identity) if identity.account_id().is_some() => Ok(AccountContext {
                identity,
                organization_id: ctx.organization_id,
                event: ctx.event,
            }),
            _ => {
                debug!(path = %call.path, "Rejected unauthenticated call");
                Err(
                    AppError::unauthorized("You must be signed in to access this resource")
                        .with_redirect(self.sign_in_path.clone()),
                )
            }
        }
    }
}
