//! Procedure registry: path → gate chain + handler.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;

use crate::context::ProcedureContext;
use crate::procedure::{Call, Gate, Procedure};

type BoxedHandler =
    Arc<dyn Fn(ProcedureContext, Call) -> BoxFuture<'static, AppResult<Value>> + Send + Sync>;

/// Maps procedure paths to their gate chain and handler.
///
/// A registered call runs the procedure's gates first, then decodes the
/// input into the handler's input type, then runs the handler. Input is
/// never decoded for a caller the gates rejected.
#[derive(Default, Clone)]
pub struct RpcRouter {
    handlers: HashMap<String, BoxedHandler>,
}

impl RpcRouter {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` at `path` behind `procedure`.
    pub fn procedure<Ctx, I, O, F, Fut>(
        mut self,
        path: &str,
        procedure: Procedure<Ctx>,
        handler: F,
    ) -> Self
    where
        Ctx: Send + 'static,
        I: DeserializeOwned + Send + 'static,
        O: Serialize + Send + 'static,
        F: Fn(Ctx, I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<O>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        let run = move |ctx: ProcedureContext, call: Call| -> BoxFuture<'static, AppResult<Value>> {
            let procedure = Arc::clone(&procedure);
            let handler = Arc::clone(&handler);
            Box::pin(async move {
                let ctx = procedure.apply(ctx, &call).await?;
                let input: I = serde_json::from_value(call.input).map_err(|e| {
                    debug!(path = %call.path, error = %e, "Rejected malformed input");
                    AppError::bad_request(format!("Invalid input: {e}"))
                })?;
                let output = (handler.as_ref())(ctx, input).await?;
                Ok(serde_json::to_value(output)?)
            })
        };

        self.handlers.insert(path.to_string(), Arc::new(run));
        self
    }

    /// Whether a procedure is registered at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.handlers.contains_key(path)
    }

    /// Registered paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<_> = self.handlers.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Runs the procedure registered at `path`.
    pub async fn call(&self, path: &str, ctx: ProcedureContext, input: Value) -> AppResult<Value> {
        let handler = self
            .handlers
            .get(path)
            .ok_or_else(|| AppError::not_found(format!("No procedure found at '{path}'")))?;
        handler(ctx, Call::new(path, input)).await
    }
}

impl std::fmt::Debug for RpcRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcRouter")
            .field("procedures", &self.paths())
            .finish()
    }
}
