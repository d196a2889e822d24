//! Route definitions for the Gatehouse HTTP API.
//!
//! Procedures are registered once against their procedure kind and served
//! under `/rpc/{procedure}`. The router receives `AppState` and passes it to
//! all handlers via Axum's `State` extractor.

use axum::{Router, middleware as axum_middleware, routing::get};
use tower_http::trace::TraceLayer;

use gatehouse_core::result::AppResult;

use crate::handlers;
use crate::middleware;
use crate::procedure::Procedures;
use crate::rpc::RpcRouter;
use crate::rpc::endpoint;
use crate::state::AppState;

/// Registers every procedure against the bundle it requires.
pub fn build_rpc_router(procedures: &Procedures) -> AppResult<RpcRouter> {
    Ok(RpcRouter::new()
        // Public
        .procedure("health.ping", procedures.public.clone(), handlers::health::ping)
        // Public, verified and rate limited
        .procedure(
            "contact.submit",
            procedures.public_rate_limited("contact.submit")?,
            handlers::public::contact_submit,
        )
        .procedure(
            "waitlist.join",
            procedures.public_rate_limited("waitlist.join")?,
            handlers::public::waitlist_join,
        )
        .procedure(
            "auth.requestPasswordReset",
            procedures.public_rate_limited("auth.requestPasswordReset")?,
            handlers::public::request_password_reset,
        )
        .procedure(
            "auth.signUp",
            procedures.public_rate_limited("auth.signUp")?,
            handlers::public::sign_up,
        )
        // Account
        .procedure("account.me", procedures.account.clone(), handlers::account::me)
        // Organization
        .procedure(
            "organization.get",
            procedures.organization.clone(),
            handlers::organization::get,
        )
        .procedure(
            "organization.members",
            procedures.organization.clone(),
            handlers::organization::members,
        )
        // Enterprise
        .procedure(
            "enterprise.auditSettings",
            procedures.enterprise.clone(),
            handlers::enterprise::audit_settings,
        ))
}

/// Build the Axum router with all routes and middleware except CORS.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/rpc/{procedure}",
            get(endpoint::call_get).post(endpoint::call_post),
        )
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::session::resolve_session,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
