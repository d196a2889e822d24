//! Session resolution middleware.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use crate::extractors::ResolvedIdentity;
use crate::state::AppState;

/// Resolves the session cookie and stores the identity (or `None`) in the
/// request extensions for [`ResolvedIdentity`] to pick up.
pub async fn resolve_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie = session_cookie(request.headers(), &state.config.session.cookie_name);
    let identity = state.session_resolver.resolve(cookie.as_deref()).await;
    request.extensions_mut().insert(ResolvedIdentity(identity));

    next.run(request).await
}

/// Reads the session cookie from the request headers.
fn session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}
