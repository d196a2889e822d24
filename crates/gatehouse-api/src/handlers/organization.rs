//! Organization procedures. The caller is a confirmed member.

use serde::de::IgnoredAny;

use gatehouse_core::result::AppResult;

use crate::context::OrganizationContext;
use crate::dto::response::{MemberResponse, OrganizationResponse};

/// `organization.get`
pub async fn get(ctx: OrganizationContext, _input: IgnoredAny) -> AppResult<OrganizationResponse> {
    Ok(OrganizationResponse::from(&ctx.organization))
}

/// `organization.members`
pub async fn members(
    ctx: OrganizationContext,
    _input: IgnoredAny,
) -> AppResult<Vec<MemberResponse>> {
    Ok(ctx
        .organization
        .members
        .iter()
        .map(MemberResponse::from)
        .collect())
}
