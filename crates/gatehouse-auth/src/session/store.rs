//! Session record lookup.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use gatehouse_cache::CacheManager;
use gatehouse_core::result::AppResult;
use gatehouse_core::traits::cache::{CacheProvider, DocumentKey};
use gatehouse_entity::identity::SessionRecord;

/// Keyed lookup of session records by cookie token.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Finds the session record for a token.
    async fn find_by_token(&self, token: &str) -> AppResult<Option<SessionRecord>>;
}

/// Session store backed by the configured cache provider.
///
/// Records are JSON documents written by the auth service under
/// `session:<token>`.
#[derive(Debug, Clone)]
pub struct CacheSessionStore {
    cache: Arc<CacheManager>,
}

impl CacheSessionStore {
    /// Creates a new store over the given cache.
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self { cache }
    }

    /// Writes a session record, expiring it with the session.
    pub async fn save(&self, record: &SessionRecord) -> AppResult<()> {
        let remaining = (record.expires_at - Utc::now())
            .to_std()
            .unwrap_or(Duration::from_secs(1));
        self.cache
            .put_json(&DocumentKey::session(&record.token), record, Some(remaining))
            .await
    }
}

#[async_trait]
impl SessionStore for CacheSessionStore {
    async fn find_by_token(&self, token: &str) -> AppResult<Option<SessionRecord>> {
        self.cache.get_json(&DocumentKey::session(token)).await
    }
}
