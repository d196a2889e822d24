//! Enterprise procedures.

use serde::de::IgnoredAny;

use gatehouse_core::result::AppResult;

use crate::context::OrganizationContext;
use crate::dto::response::AuditSettingsResponse;

const DEFAULT_RETENTION_DAYS: u32 = 365;

/// `enterprise.auditSettings`
pub async fn audit_settings(
    ctx: OrganizationContext,
    _input: IgnoredAny,
) -> AppResult<AuditSettingsResponse> {
    Ok(AuditSettingsResponse {
        organization_id: ctx.organization.id.clone(),
        retention_days: DEFAULT_RETENTION_DAYS,
        export_enabled: true,
    })
}
