//! Gate trait and composition.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use gatehouse_core::result::AppResult;

/// Call-level data visible to every gate.
#[derive(Debug, Clone)]
pub struct Call {
    /// Procedure path, e.g. `organization.get`.
    pub path: String,
    /// Raw JSON input (`null` when the caller sent none).
    pub input: Value,
}

impl Call {
    /// Creates a call.
    pub fn new(path: impl Into<String>, input: Value) -> Self {
        Self {
            path: path.into(),
            input,
        }
    }

    /// Returns a non-empty string field of the input object.
    pub fn input_str(&self, field: &str) -> Option<&str> {
        self.input
            .get(field)
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// A middleware stage that either forwards an (augmented) context or aborts.
///
/// # Execution
///
/// - `Ok(output)`: continue with `output` as the next stage's context
/// - `Err(AppError)`: stop the chain; no later stage runs
#[async_trait]
pub trait Gate<C>: Send + Sync + 'static
where
    C: Send + 'static,
{
    /// Context forwarded to the next stage.
    type Output: Send + 'static;

    /// Inspects `ctx` and forwards or aborts.
    async fn apply(&self, ctx: C, call: &Call) -> AppResult<Self::Output>;
}

/// Runs `first`, then `second` on its output.
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Chain<A, B> {
    /// Composes two gates.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

#[async_trait]
impl<C, A, B> Gate<C> for Chain<A, B>
where
    C: Send + 'static,
    A: Gate<C>,
    B: Gate<A::Output>,
{
    type Output = B::Output;

    async fn apply(&self, ctx: C, call: &Call) -> AppResult<Self::Output> {
        let ctx = self.first.apply(ctx, call).await?;
        self.second.apply(ctx, call).await
    }
}

/// Forwards the context unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

#[async_trait]
impl<C> Gate<C> for Passthrough
where
    C: Send + 'static,
{
    type Output = C;

    async fn apply(&self, ctx: C, _call: &Call) -> AppResult<C> {
        Ok(ctx)
    }
}

#[async_trait]
impl<C, G> Gate<C> for Arc<G>
where
    C: Send + 'static,
    G: Gate<C> + ?Sized,
{
    type Output = G::Output;

    async fn apply(&self, ctx: C, call: &Call) -> AppResult<Self::Output> {
        (**self).apply(ctx, call).await
    }
}
