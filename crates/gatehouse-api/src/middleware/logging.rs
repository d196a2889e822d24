//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

use crate::extractors::ResolvedIdentity;

/// Logs request method, path, status, caller and duration.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let authenticated = request
        .extensions()
        .get::<ResolvedIdentity>()
        .is_some_and(|ResolvedIdentity(identity)| identity.is_some());
    let start = Instant::now();

    let response = next.run(request).await;

    info!(
        method = %method,
        path = %uri.path(),
        status = response.status().as_u16(),
        authenticated,
        duration_ms = start.elapsed().as_millis() as u64,
        "HTTP request"
    );

    response
}
