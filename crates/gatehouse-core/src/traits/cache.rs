//! Document store trait for the key-value backend shared with the auth service.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Kinds of document Gatehouse reads from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Session record, keyed by cookie token.
    Session,
    /// Organization with its member list, keyed by organization id.
    Organization,
}

impl DocumentKind {
    /// Key namespace for this kind.
    pub fn namespace(self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::Organization => "organization",
        }
    }
}

/// Address of one document, rendered as `<namespace>:<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    kind: DocumentKind,
    id: String,
}

impl DocumentKey {
    /// Key of the session record for a cookie token.
    pub fn session(token: &str) -> Self {
        Self {
            kind: DocumentKind::Session,
            id: token.to_string(),
        }
    }

    /// Key of an organization document.
    pub fn organization(organization_id: &str) -> Self {
        Self {
            kind: DocumentKind::Organization,
            id: organization_id.to_string(),
        }
    }

    /// Document kind.
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.namespace(), self.id)
    }
}

/// Key-value backend holding JSON documents (Redis or in-memory).
///
/// Providers own the physical key layout and lifetime enforcement.
#[async_trait]
pub trait CacheProvider: Send + Sync + fmt::Debug + 'static {
    /// Reads a document. Missing and expired documents are both `None`.
    async fn get(&self, key: &DocumentKey) -> AppResult<Option<String>>;

    /// Writes a document. `ttl` of `None` applies the provider's default lifetime.
    async fn put(&self, key: &DocumentKey, value: &str, ttl: Option<Duration>) -> AppResult<()>;

    /// Reads and decodes a JSON document.
    async fn get_json<T: serde::de::DeserializeOwned + Send>(
        &self,
        key: &DocumentKey,
    ) -> AppResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key).await? {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }

    /// Encodes and writes a JSON document.
    async fn put_json<T: serde::Serialize + Send + Sync>(
        &self,
        key: &DocumentKey,
        value: &T,
        ttl: Option<Duration>,
    ) -> AppResult<()>
    where
        Self: Sized,
    {
        let json = serde_json::to_string(value)?;
        self.put(key, &json, ttl).await
    }

    /// Checks that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
