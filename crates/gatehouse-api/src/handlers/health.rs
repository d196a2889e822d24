//! Health check handlers.

use axum::Json;
use axum::extract::State;
use serde::de::IgnoredAny;

use gatehouse_core::result::AppResult;
use gatehouse_core::traits::CacheProvider;

use crate::context::ProcedureContext;
use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache_ok = state.cache.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: if cache_ok { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache: if cache_ok { "connected" } else { "unavailable" }.to_string(),
        cache_backend: state.cache.backend().to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

/// `health.ping` (public)
pub async fn ping(_ctx: ProcedureContext, _input: IgnoredAny) -> AppResult<&'static str> {
    Ok("pong")
}
