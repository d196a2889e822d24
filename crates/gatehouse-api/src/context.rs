//! Per-call contexts threaded through the gate chain.
//!
//! Each gate consumes the context it requires and forwards a context that
//! only adds to it. The types encode what earlier gates established:
//! [`AccountContext`] has a non-optional identity, [`OrganizationContext`]
//! additionally has a membership-confirmed organization.
//!
//! Until the membership gate runs only the selected organization's id is
//! known; the document itself is loaded by that gate.

use gatehouse_entity::identity::Identity;
use gatehouse_entity::organization::MemberOrganization;

use crate::extractors::TransportEvent;

/// Context every procedure call starts from.
#[derive(Debug, Clone, Default)]
pub struct ProcedureContext {
    /// Caller identity resolved from the session cookie.
    pub identity: Option<Identity>,
    /// Id of the caller's selected organization.
    pub organization_id: Option<String>,
    /// The underlying HTTP request.
    pub event: TransportEvent,
}

/// Context after the authentication gate.
#[derive(Debug, Clone)]
pub struct AccountContext {
    /// Authenticated caller.
    pub identity: Identity,
    /// Id of the caller's selected organization, not yet loaded.
    pub organization_id: Option<String>,
    /// The underlying HTTP request.
    pub event: TransportEvent,
}

/// Context after the organization membership gate.
#[derive(Debug, Clone)]
pub struct OrganizationContext {
    /// Authenticated caller.
    pub identity: Identity,
    /// Selected organization with the caller's membership id.
    pub organization: MemberOrganization,
    /// The underlying HTTP request.
    pub event: TransportEvent,
}
