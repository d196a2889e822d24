//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gatehouse_entity::identity::Identity;
use gatehouse_entity::organization::{Member, MemberOrganization, MemberRole};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Cache backend status.
    pub cache: String,
    /// Active cache backend (`memory` or `redis`).
    pub cache_backend: String,
    /// Seconds since the application was built.
    pub uptime_seconds: u64,
}

/// `account.me` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Account ID.
    pub id: String,
    /// Email.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
    /// Whether the email is verified.
    pub email_verified: bool,
    /// Active organization recorded on the session.
    pub active_organization_id: Option<String>,
    /// Session expiry.
    pub session_expires_at: DateTime<Utc>,
}

impl From<&Identity> for AccountResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.clone(),
            email: identity.email.clone(),
            name: identity.name.clone(),
            email_verified: identity.session.user.email_verified,
            active_organization_id: identity.session.active_organization_id.clone(),
            session_expires_at: identity.session.expires_at,
        }
    }
}

/// `organization.get` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationResponse {
    /// Organization ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// The caller's membership ID.
    pub member_id: String,
    /// Number of members.
    pub member_count: usize,
}

impl From<&MemberOrganization> for OrganizationResponse {
    fn from(org: &MemberOrganization) -> Self {
        Self {
            id: org.id.clone(),
            name: org.name.clone(),
            slug: org.slug.clone(),
            member_id: org.member_id.clone(),
            member_count: org.members.len(),
        }
    }
}

/// One entry of `organization.members`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    /// Membership ID.
    pub id: String,
    /// Account ID.
    pub user_id: String,
    /// Role.
    pub role: MemberRole,
    /// Joined at.
    pub created_at: DateTime<Utc>,
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.clone(),
            user_id: member.user_id.clone(),
            role: member.role,
            created_at: member.created_at,
        }
    }
}

/// `enterprise.auditSettings` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSettingsResponse {
    /// Organization ID.
    pub organization_id: String,
    /// How long audit entries are kept.
    pub retention_days: u32,
    /// Whether audit logs can be exported.
    pub export_enabled: bool,
}

/// Acknowledgement for accepted public submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptedResponse {
    /// Always `true`.
    pub accepted: bool,
    /// Message shown to the user.
    pub message: String,
}

impl AcceptedResponse {
    /// Creates an acknowledgement.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            accepted: true,
            message: message.into(),
        }
    }
}
