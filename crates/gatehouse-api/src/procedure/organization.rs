//! Organization membership gate.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use gatehouse_auth::organization::OrganizationStore;
use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_entity::organization::MemberOrganization;

use crate::context::{AccountContext, OrganizationContext};

use super::gate::{Call, Gate};

/// Requires a selected organization that lists the caller as a member.
///
/// The organization document is loaded here, so only organization-scoped
/// procedures depend on the organization store. An id the store does not
/// know is treated like no selection.
#[derive(Debug, Clone)]
pub struct MembershipGate {
    organizations: Arc<dyn OrganizationStore>,
}

impl MembershipGate {
    /// Creates the gate over an organization store.
    pub fn new(organizations: Arc<dyn OrganizationStore>) -> Self {
        Self { organizations }
    }
}

#[async_trait]
impl Gate<AccountContext> for MembershipGate {
    type Output = OrganizationContext;

    async fn apply(&self, ctx: AccountContext, call: &Call) -> AppResult<OrganizationContext> {
        let organization = match ctx.organization_id.as_deref() {
            Some(organization_id) => {
                let found = self.organizations.find_by_id(organization_id).await?;
                if found.is_none() {
                    debug!(organization_id = %organization_id, "Selected organization not found");
                }
                found
            }
            None => None,
        };

        let Some(organization) = organization else {
            debug!(path = %call.path, "Rejected call without selected organization");
            return Err(AppError::bad_request("No organization selected"));
        };

        let member_id = ctx
            .identity
            .account_id()
            .and_then(|account_id| organization.find_member(account_id))
            .map(|member| member.id.clone());

        let Some(member_id) = member_id else {
            debug!(
                path = %call.path,
                organization_id = %organization.id,
                "Rejected call from non-member"
            );
            return Err(AppError::unauthorized(
                "You are not a member of this organization",
            ));
        };

        Ok(OrganizationContext {
            identity: ctx.identity,
            organization: MemberOrganization {
                organization,
                member_id,
            },
            event: ctx.event,
        })
    }
}
