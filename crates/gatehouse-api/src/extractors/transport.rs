//! `TransportEvent` extractor: ambient request data available to gates.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;

/// The underlying HTTP request of a procedure call.
#[derive(Debug, Clone, Default)]
pub struct TransportEvent {
    headers: HeaderMap,
    peer: Option<SocketAddr>,
}

impl TransportEvent {
    /// Creates an event from request headers and the peer socket address.
    pub fn new(headers: HeaderMap, peer: Option<SocketAddr>) -> Self {
        Self { headers, peer }
    }

    /// Returns a header value as a string.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Best-effort caller IP address.
    ///
    /// Prefers the first `x-forwarded-for` hop, then `x-real-ip`, then the
    /// socket peer.
    pub fn client_ip(&self) -> Option<String> {
        let forwarded = self
            .header("x-forwarded-for")
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        let real_ip = self
            .header("x-real-ip")
            .map(str::trim)
            .filter(|v| !v.is_empty());

        forwarded
            .or(real_ip)
            .map(String::from)
            .or_else(|| self.peer.map(|addr| addr.ip().to_string()))
    }
}

impl<S> FromRequestParts<S> for TransportEvent
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(Self::new(parts.headers.clone(), peer))
    }
}
