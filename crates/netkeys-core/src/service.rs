// ABOUTME: Capability consumed from the remote identity service.
// ABOUTME: Async trait for entity metadata and key fetches, plus its error type.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{EntityId, EntityMetadata, KeyCollection, KeyQuery};

/// Failures reported by an identity service implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The entity does not exist.
    #[error("entity not found: {0}")]
    NotFound(String),

    /// The service refused the request.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The service could not be reached or did not answer in time.
    #[error("identity service unavailable: {0}")]
    Unavailable(String),

    /// Any other error returned by the service.
    #[error("identity service error: {0}")]
    Remote(String),
}

/// Remote identity service as seen by the lookup core.
///
/// Implementations own transport, timeouts and retries. The core calls each
/// method at most once per lookup.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Fetch metadata for `id`.
    async fn entity_info(&self, id: &EntityId) -> Result<EntityMetadata, ServiceError>;

    /// Fetch the stored keys described by `query`.
    async fn entity_keys(&self, query: &KeyQuery) -> Result<KeyCollection, ServiceError>;
}
