//! Identity and session record models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account attributes embedded in a session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAttributes {
    /// Account identifier assigned by the auth provider.
    pub id: String,
    /// Primary email address.
    pub email: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the email address has been verified.
    #[serde(default)]
    pub email_verified: bool,
}

/// A session as stored by the external session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Session identifier.
    pub id: String,
    /// Opaque token carried in the session cookie.
    pub token: String,
    /// The signed-in account.
    pub user: AccountAttributes,
    /// Organization the user last switched to.
    #[serde(default)]
    pub active_organization_id: Option<String>,
    /// IP address the session was created from.
    #[serde(default)]
    pub ip_address: Option<String>,
    /// User-Agent the session was created with.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Returns whether the session has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// The resolved caller for one request.
///
/// Built from a session record; never persisted by Gatehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Account identifier.
    pub id: String,
    /// Primary email address.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
    /// The full session record the identity was resolved from.
    pub session: SessionRecord,
}

impl Identity {
    /// Builds an identity from a session record.
    pub fn from_session(session: SessionRecord) -> Self {
        Self {
            id: session.user.id.clone(),
            email: session.user.email.clone(),
            name: session.user.name.clone(),
            session,
        }
    }

    /// Returns the account identifier when both the top-level id and the
    /// session's embedded account id are present.
    pub fn account_id(&self) -> Option<&str> {
        if self.id.is_empty() || self.session.user.id.is_empty() {
            return None;
        }
        Some(&self.id)
    }
}
