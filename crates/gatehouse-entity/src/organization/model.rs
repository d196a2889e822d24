//! Organization and membership models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a member inside an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Created the organization.
    Owner,
    /// Can manage members and settings.
    Admin,
    /// Regular member.
    Member,
}

/// A membership record inside an organization's member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Membership identifier.
    pub id: String,
    /// Account identifier of the member.
    pub user_id: String,
    /// Role within the organization.
    pub role: MemberRole,
    /// When the account joined.
    pub created_at: DateTime<Utc>,
}

/// An organization with its member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Organization identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Members, in insertion order.
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Organization {
    /// Finds the membership record for an account (linear scan).
    pub fn find_member(&self, user_id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.user_id == user_id)
    }
}

/// An organization confirmed to contain the caller, with the caller's
/// membership identifier attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberOrganization {
    /// The organization as resolved for the request.
    #[serde(flatten)]
    pub organization: Organization,
    /// The caller's membership identifier.
    pub member_id: String,
}

impl std::ops::Deref for MemberOrganization {
    type Target = Organization;
    fn deref(&self) -> &Self::Target {
        &self.organization
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, user_id: &str) -> Member {
        Member {
            id: id.to_string(),
            user_id: user_id.to_string(),
            role: MemberRole::Member,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_find_member() {
        let org = Organization {
            id: "org_1".to_string(),
            name: "Acme".to_string(),
            slug: "acme".to_string(),
            members: vec![member("mem_1", "usr_1"), member("mem_2", "usr_2")],
        };
        assert_eq!(org.find_member("usr_2").map(|m| m.id.as_str()), Some("mem_2"));
        assert!(org.find_member("usr_3").is_none());
    }

    #[test]
    fn test_member_organization_serializes_flat() {
        let org = MemberOrganization {
            organization: Organization {
                id: "org_1".to_string(),
                name: "Acme".to_string(),
                slug: "acme".to_string(),
                members: Vec::new(),
            },
            member_id: "mem_1".to_string(),
        };
        let json = serde_json::to_value(&org).unwrap();
        assert_eq!(json["id"], "org_1");
        assert_eq!(json["memberId"], "mem_1");
        assert_eq!(org.slug, "acme");
    }
}
