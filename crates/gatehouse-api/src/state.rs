//! Application state shared across handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use gatehouse_auth::session::SessionResolver;
use gatehouse_cache::provider::CacheManager;
use gatehouse_core::config::AppConfig;
use gatehouse_core::runtime::RuntimeConfigProvider;

use crate::rpc::RpcRouter;

/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration as loaded at startup.
    pub config: Arc<AppConfig>,
    /// Per-call runtime flags.
    pub runtime: Arc<dyn RuntimeConfigProvider>,
    /// Cache backend (Redis or in-memory).
    pub cache: Arc<CacheManager>,
    /// Resolves the session cookie into an identity.
    pub session_resolver: Arc<SessionResolver>,
    /// Registered procedures.
    pub rpc: Arc<RpcRouter>,
    /// When the application was built.
    pub started_at: Instant,
}
