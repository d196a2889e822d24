//! Success envelope for RPC responses.

use serde::{Deserialize, Serialize};

/// `{"result": {"data": ...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse<T> {
    /// Call result.
    pub result: RpcResult<T>,
}

/// Wrapper around the handler output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResult<T> {
    /// Handler output.
    pub data: T,
}

impl<T> RpcResponse<T> {
    /// Wraps a handler output.
    pub fn new(data: T) -> Self {
        Self {
            result: RpcResult { data },
        }
    }
}
