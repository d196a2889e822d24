//! Resolves the caller identity from a session cookie value.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use gatehouse_entity::identity::Identity;

use super::store::SessionStore;

/// Turns a session cookie value into an [`Identity`].
///
/// Every failure mode resolves to an anonymous caller: no cookie, unknown
/// token, expired record, and an unreachable store. Store failures are
/// logged so they remain visible to operators.
///
/// Signatures are verified by the service that issues the cookie; a
/// forged signature still has to match a stored token to resolve.
#[derive(Debug, Clone)]
pub struct SessionResolver {
    store: Arc<dyn SessionStore>,
    signed_cookies: bool,
}

impl SessionResolver {
    /// Creates a resolver over a session store. With `signed_cookies`, the
    /// trailing `.<signature>` is stripped before lookup.
    pub fn new(store: Arc<dyn SessionStore>, signed_cookies: bool) -> Self {
        Self {
            store,
            signed_cookies,
        }
    }

    /// Resolves an identity from the raw cookie value, if any.
    pub async fn resolve(&self, cookie_value: Option<&str>) -> Option<Identity> {
        let token = cookie_value
            .map(|value| session_token(value, self.signed_cookies))
            .filter(|t| !t.is_empty())?;

        let record = match self.store.find_by_token(token).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!("Session token not found");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Session store lookup failed, treating caller as anonymous");
                return None;
            }
        };

        if record.is_expired_at(Utc::now()) {
            debug!(session_id = %record.id, "Session expired");
            return None;
        }

        Some(Identity::from_session(record))
    }
}

/// Extracts the lookup token from a cookie value.
///
/// Signed cookies carry `<token>.<signature>`; the store is keyed by the
/// token alone. Unsigned values are used whole.
pub fn session_token(cookie_value: &str, signed: bool) -> &str {
    let value = cookie_value.trim();
    if !signed {
        return value;
    }
    match value.rsplit_once('.') {
        Some((token, _signature)) => token,
        None => value,
    }
}
