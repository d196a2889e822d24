//! Custom Axum extractors.

pub mod identity;
pub mod transport;

pub use identity::ResolvedIdentity;
pub use transport::TransportEvent;
