//! In-process document store using moka.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tracing::debug;

use gatehouse_core::config::cache::MemoryCacheConfig;
use gatehouse_core::result::AppResult;
use gatehouse_core::traits::cache::{CacheProvider, DocumentKey};

#[derive(Debug, Clone)]
struct Document {
    json: String,
    ttl: Duration,
}

/// Each document expires after the TTL it was written with.
struct WrittenTtl;

impl Expiry<DocumentKey, Document> for WrittenTtl {
    fn expire_after_create(
        &self,
        _key: &DocumentKey,
        value: &Document,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &DocumentKey,
        value: &Document,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Document store held in process memory.
///
/// Lifetimes are capped at `memory.time_to_live_seconds`, and the store is
/// bounded by `memory.max_capacity` documents.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    documents: Cache<DocumentKey, Document>,
    default_ttl: Duration,
    max_ttl: Duration,
}

impl MemoryCacheProvider {
    /// Creates an empty store.
    pub fn new(config: &MemoryCacheConfig, default_ttl_seconds: u64) -> Self {
        let documents = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(WrittenTtl)
            .build();

        Self {
            documents,
            default_ttl: Duration::from_secs(default_ttl_seconds),
            max_ttl: Duration::from_secs(config.time_to_live_seconds),
        }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &DocumentKey) -> AppResult<Option<String>> {
        Ok(self.documents.get(key).await.map(|doc| doc.json))
    }

    async fn put(&self, key: &DocumentKey, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        let ttl = ttl.unwrap_or(self.default_ttl).min(self.max_ttl);
        self.documents
            .insert(
                key.clone(),
                Document {
                    json: value.to_string(),
                    ttl,
                },
            )
            .await;
        debug!(kind = ?key.kind(), ttl_secs = ttl.as_secs(), "Stored document in memory");
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
