//! Backend selection.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use gatehouse_core::config::CacheConfig;
use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_core::traits::cache::{CacheProvider, DocumentKey};

/// The document store chosen by `cache.provider`.
#[derive(Debug, Clone)]
pub struct CacheManager {
    backend: &'static str,
    inner: Arc<dyn CacheProvider>,
}

impl CacheManager {
    /// Opens the configured backend. Redis is connected eagerly so a bad
    /// URL fails startup.
    pub async fn new(config: &CacheConfig) -> AppResult<Self> {
        let (backend, inner): (&'static str, Arc<dyn CacheProvider>) =
            match config.provider.as_str() {
                #[cfg(feature = "redis-backend")]
                "redis" => {
                    let conn = crate::redis::connect(&config.redis).await?;
                    let provider = crate::redis::RedisCacheProvider::new(
                        conn,
                        &config.redis,
                        config.default_ttl_seconds,
                    );
                    ("redis", Arc::new(provider))
                }
                #[cfg(feature = "memory")]
                "memory" => {
                    let provider = crate::memory::MemoryCacheProvider::new(
                        &config.memory,
                        config.default_ttl_seconds,
                    );
                    ("memory", Arc::new(provider))
                }
                other => {
                    return Err(AppError::configuration(format!(
                        "Unknown cache provider: '{other}'. Supported: memory, redis"
                    )));
                }
            };

        info!(backend, "Document store ready");
        Ok(Self { backend, inner })
    }

    /// Name of the active backend.
    pub fn backend(&self) -> &'static str {
        self.backend
    }
}

#[async_trait]
impl CacheProvider for CacheManager {
    async fn get(&self, key: &DocumentKey) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn put(&self, key: &DocumentKey, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        self.inner.put(key, value, ttl).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
