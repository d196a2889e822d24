//! Process-wide runtime configuration consulted by gates on every call.
//!
//! Gates never read these values from globals or cache them at
//! construction. They hold an `Arc<dyn RuntimeConfigProvider>` and ask for
//! the current settings per call, so flags flipped by a configuration
//! reload apply to the very next request.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::{AppConfig, Environment};

/// Settings that may change while the process runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeSettings {
    /// Whether enterprise procedures may be called.
    pub enterprise_enabled: bool,
    /// Bot-verification secret; `None` disables verification.
    pub turnstile_secret: Option<String>,
    /// Root key for the remote rate limiter.
    pub rate_limit_root_key: Option<String>,
    /// Runtime mode.
    pub environment: Environment,
}

impl RuntimeSettings {
    /// Extracts the runtime settings from a loaded configuration.
    ///
    /// Empty strings count as unset.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            enterprise_enabled: config.features.enterprise_enabled,
            turnstile_secret: non_empty(config.turnstile.secret_key.as_deref()),
            rate_limit_root_key: non_empty(config.rate_limit.root_key.as_deref()),
            environment: config.server.environment,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Source of the current runtime settings.
#[async_trait]
pub trait RuntimeConfigProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Returns the settings in effect right now.
    async fn current(&self) -> RuntimeSettings;

    /// Whether enterprise features are enabled.
    async fn enterprise_enabled(&self) -> bool {
        self.current().await.enterprise_enabled
    }

    /// The configured bot-verification secret, if any.
    async fn turnstile_secret(&self) -> Option<String> {
        self.current().await.turnstile_secret
    }

    /// The configured rate limiter root key, if any.
    async fn rate_limit_root_key(&self) -> Option<String> {
        self.current().await.rate_limit_root_key
    }

    /// The current runtime mode.
    async fn environment(&self) -> Environment {
        self.current().await.environment
    }
}

/// Runtime settings shared behind a read-write lock.
#[derive(Debug, Clone, Default)]
pub struct SharedRuntimeConfig {
    inner: Arc<RwLock<RuntimeSettings>>,
}

impl SharedRuntimeConfig {
    /// Creates a provider holding the given settings.
    pub fn new(settings: RuntimeSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    /// Creates a provider seeded from a loaded configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(RuntimeSettings::from_config(config))
    }

    /// Replaces the settings wholesale.
    pub async fn replace(&self, settings: RuntimeSettings) {
        let mut guard = self.inner.write().await;
        if *guard != settings {
            info!(
                enterprise_enabled = settings.enterprise_enabled,
                turnstile = settings.turnstile_secret.is_some(),
                rate_limit = settings.rate_limit_root_key.is_some(),
                environment = ?settings.environment,
                "Runtime settings updated"
            );
        }
        *guard = settings;
    }

    /// Applies an in-place modification.
    pub async fn update(&self, f: impl FnOnce(&mut RuntimeSettings)) {
        let mut guard = self.inner.write().await;
        f(&mut guard);
    }
}

#[async_trait]
impl RuntimeConfigProvider for SharedRuntimeConfig {
    async fn current(&self) -> RuntimeSettings {
        self.inner.read().await.clone()
    }
}
