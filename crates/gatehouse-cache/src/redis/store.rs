//! Redis-backed [`CacheProvider`].

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::debug;

use gatehouse_core::config::cache::RedisCacheConfig;
use gatehouse_core::error::{AppError, ErrorKind};
use gatehouse_core::result::AppResult;
use gatehouse_core::traits::cache::{CacheProvider, DocumentKey};

/// Physical key layout: the configured prefix, then `<namespace>:<id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpace {
    prefix: String,
}

impl KeySpace {
    /// Creates a key space. A non-empty prefix is separated by `:`.
    pub fn new(prefix: &str) -> Self {
        let prefix = match prefix {
            "" => String::new(),
            p if p.ends_with(':') => p.to_string(),
            p => format!("{p}:"),
        };
        Self { prefix }
    }

    /// Redis key for a document.
    pub fn key(&self, key: &DocumentKey) -> String {
        format!("{}{key}", self.prefix)
    }
}

/// Whole seconds for `SET EX`, rounded up. Never 0, which `SET EX` rejects.
fn expiry_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
    secs.max(1)
}

/// Redis-backed document store.
#[derive(Clone)]
pub struct RedisCacheProvider {
    conn: ConnectionManager,
    keys: KeySpace,
    default_ttl: Duration,
}

impl std::fmt::Debug for RedisCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheProvider")
            .field("keys", &self.keys)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

impl RedisCacheProvider {
    /// Creates a provider over an open connection.
    pub fn new(conn: ConnectionManager, config: &RedisCacheConfig, default_ttl_seconds: u64) -> Self {
        Self {
            conn,
            keys: KeySpace::new(&config.key_prefix),
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }

    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Cache, format!("Redis error: {e}"), e)
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get(&self, key: &DocumentKey) -> AppResult<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(self.keys.key(key)).await.map_err(Self::map_err)?;
        if value.is_none() {
            debug!(kind = ?key.kind(), "Redis document miss");
        }
        Ok(value)
    }

    async fn put(&self, key: &DocumentKey, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        let seconds = expiry_seconds(ttl.unwrap_or(self.default_ttl));
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(self.keys.key(key), value, seconds)
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.conn.clone();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}
