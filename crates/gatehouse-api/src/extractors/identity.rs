//! `ResolvedIdentity` extractor: the identity attached by the session middleware.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use gatehouse_entity::identity::Identity;

/// Identity resolved from the session cookie, or `None` for anonymous callers.
///
/// Requests that bypassed the session middleware extract as anonymous.
#[derive(Debug, Clone, Default)]
pub struct ResolvedIdentity(pub Option<Identity>);

impl<S> FromRequestParts<S> for ResolvedIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<ResolvedIdentity>()
            .cloned()
            .unwrap_or_default())
    }
}
