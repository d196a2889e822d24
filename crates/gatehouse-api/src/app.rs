//! Application builder: wires backends, procedures and middleware into an Axum app.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use tracing::info;

use gatehouse_auth::organization::{CacheOrganizationStore, OrganizationStore};
use gatehouse_auth::ratelimit::{ConfiguredLimiterFactory, LimiterFactory};
use gatehouse_auth::session::{CacheSessionStore, SessionResolver, SessionStore};
use gatehouse_auth::turnstile::{BotVerifier, TurnstileClient};
use gatehouse_cache::provider::CacheManager;
use gatehouse_core::config::AppConfig;
use gatehouse_core::result::AppResult;
use gatehouse_core::runtime::RuntimeConfigProvider;

use crate::middleware::cors::build_cors_layer;
use crate::procedure::{ProcedureDeps, Procedures, table};
use crate::router::{build_router, build_rpc_router};
use crate::state::AppState;

/// External collaborators the application is built from.
///
/// [`AppDependencies::from_config`] builds the production set; tests swap
/// in doubles for any of them.
#[derive(Clone)]
pub struct AppDependencies {
    /// Cache backend.
    pub cache: Arc<CacheManager>,
    /// Session lookup.
    pub sessions: Arc<dyn SessionStore>,
    /// Organization lookup.
    pub organizations: Arc<dyn OrganizationStore>,
    /// Bot-verification backend.
    pub verifier: Arc<dyn BotVerifier>,
    /// Builds one limiter per rate-limited route.
    pub limiters: Arc<dyn LimiterFactory>,
    /// Per-call runtime flags.
    pub runtime: Arc<dyn RuntimeConfigProvider>,
}

impl AppDependencies {
    /// Builds the production collaborators from configuration.
    pub async fn from_config(
        config: &AppConfig,
        runtime: Arc<dyn RuntimeConfigProvider>,
    ) -> AppResult<Self> {
        info!(provider = %config.cache.provider, "Initializing cache");
        let cache = Arc::new(CacheManager::new(&config.cache).await?);

        let root_key = runtime.rate_limit_root_key().await;
        let limiters = ConfiguredLimiterFactory::new(config.rate_limit.clone(), root_key);

        Ok(Self {
            sessions: Arc::new(CacheSessionStore::new(Arc::clone(&cache))),
            organizations: Arc::new(CacheOrganizationStore::new(Arc::clone(&cache))),
            verifier: Arc::new(TurnstileClient::new(&config.turnstile)?),
            limiters: Arc::new(limiters),
            cache,
            runtime,
        })
    }
}

impl std::fmt::Debug for AppDependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppDependencies")
            .field("cache", &self.cache)
            .field("sessions", &self.sessions)
            .field("organizations", &self.organizations)
            .field("verifier", &self.verifier)
            .finish_non_exhaustive()
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(config: AppConfig, deps: AppDependencies) -> AppResult<Router> {
    let procedure_deps = ProcedureDeps {
        runtime: Arc::clone(&deps.runtime),
        verifier: Arc::clone(&deps.verifier),
        organizations: Arc::clone(&deps.organizations),
        sign_in_path: config.session.sign_in_path.clone(),
    };
    let procedures = Procedures::build(&procedure_deps, &table::rules(), deps.limiters.as_ref());
    let rpc = build_rpc_router(&procedures)?;
    info!(procedures = ?rpc.paths(), "Registered procedures");

    let cors = build_cors_layer(&config.server.cors);
    let session_resolver = SessionResolver::new(deps.sessions, config.session.signed_cookies);
    let state = AppState {
        config: Arc::new(config),
        runtime: deps.runtime,
        cache: deps.cache,
        session_resolver: Arc::new(session_resolver),
        rpc: Arc::new(rpc),
        started_at: Instant::now(),
    };

    Ok(build_router(state).layer(cors))
}
