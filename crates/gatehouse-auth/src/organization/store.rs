//! Organization document lookup.

use std::sync::Arc;

use async_trait::async_trait;

use gatehouse_cache::CacheManager;
use gatehouse_core::result::AppResult;
use gatehouse_core::traits::cache::{CacheProvider, DocumentKey};
use gatehouse_entity::organization::Organization;

/// Keyed lookup of organizations with their member lists.
#[async_trait]
pub trait OrganizationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Finds an organization by ID.
    async fn find_by_id(&self, organization_id: &str) -> AppResult<Option<Organization>>;
}

/// Organization store backed by the configured cache provider.
#[derive(Debug, Clone)]
pub struct CacheOrganizationStore {
    cache: Arc<CacheManager>,
}

impl CacheOrganizationStore {
    /// Creates a new store over the given cache.
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self { cache }
    }

    /// Writes an organization document with the cache's default TTL.
    pub async fn save(&self, organization: &Organization) -> AppResult<()> {
        self.cache
            .put_json(&DocumentKey::organization(&organization.id), organization, None)
            .await
    }
}

#[async_trait]
impl OrganizationStore for CacheOrganizationStore {
    async fn find_by_id(&self, organization_id: &str) -> AppResult<Option<Organization>> {
        self.cache
            .get_json(&DocumentKey::organization(organization_id))
            .await
    }
}
