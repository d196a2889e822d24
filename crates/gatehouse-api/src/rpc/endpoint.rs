//! HTTP endpoints dispatching into the procedure registry.

use std::collections::HashMap;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use gatehouse_core::config::AppConfig;
use gatehouse_core::error::AppError;
use gatehouse_entity::identity::Identity;

use crate::context::ProcedureContext;
use crate::error::ApiError;
use crate::extractors::{ResolvedIdentity, TransportEvent};
use crate::state::AppState;

use super::envelope::RpcResponse;

/// POST /rpc/{procedure}
///
/// The body is the JSON input; an empty body is `null`.
pub async fn call_post(
    State(state): State<AppState>,
    Path(path): Path<String>,
    ResolvedIdentity(identity): ResolvedIdentity,
    event: TransportEvent,
    body: Bytes,
) -> Response {
    let input = if body.iter().all(u8::is_ascii_whitespace) {
        Ok(Value::Null)
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::bad_request(format!("Request body is not valid JSON: {e}")))
    };

    match input {
        Ok(input) => dispatch(&state, path, identity, event, input).await,
        Err(e) => ApiError::for_path(e, path).into_response(),
    }
}

/// GET /rpc/{procedure}?input=<json>
pub async fn call_get(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    ResolvedIdentity(identity): ResolvedIdentity,
    event: TransportEvent,
) -> Response {
    let input = match query.get("input") {
        None => Ok(Value::Null),
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| AppError::bad_request(format!("Query input is not valid JSON: {e}"))),
    };

    match input {
        Ok(input) => dispatch(&state, path, identity, event, input).await,
        Err(e) => ApiError::for_path(e, path).into_response(),
    }
}

async fn dispatch(
    state: &AppState,
    path: String,
    identity: Option<Identity>,
    event: TransportEvent,
    input: Value,
) -> Response {
    let result = async {
        if !state.rpc.contains(&path) {
            return Err(AppError::not_found(format!("No procedure found at '{path}'")));
        }
        let ctx = procedure_context(&state.config, identity, event);
        state.rpc.call(&path, ctx, input).await
    }
    .await;

    match result {
        Ok(data) => Json(RpcResponse::new(data)).into_response(),
        Err(e) => ApiError::for_path(e, path).into_response(),
    }
}

/// Builds the base context for a call.
///
/// An organization is only selected for signed-in callers. The
/// organization header overrides the session's active organization. No
/// backend is consulted here; gates that need the organization load it.
pub fn procedure_context(
    config: &AppConfig,
    identity: Option<Identity>,
    event: TransportEvent,
) -> ProcedureContext {
    let organization_id = identity.as_ref().and_then(|identity| {
        event
            .header(&config.session.organization_header)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .or(identity.session.active_organization_id.as_deref())
            .map(String::from)
    });

    ProcedureContext {
        identity,
        organization_id,
        event,
    }
}
