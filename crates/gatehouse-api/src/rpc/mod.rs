//! RPC transport: registry, envelopes and HTTP endpoints.

pub mod endpoint;
pub mod envelope;
pub mod registry;

pub use envelope::RpcResponse;
pub use registry::RpcRouter;
