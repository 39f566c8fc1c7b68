use access_resolver_sdk::AccessResolverError;
use uuid::Uuid;

/// Failure of the read store behind [`crate::domain::AccessRepository`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A row exists but cannot be mapped, e.g. an unknown role string.
    #[error("corrupt {entity} record {id}: {reason}")]
    Corrupt {
        entity: &'static str,
        id: Uuid,
        reason: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DomainError> for AccessResolverError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Store(StoreError::Corrupt { .. }) => {
                AccessResolverError::Internal(e.to_string())
            }
            DomainError::Store(store) => AccessResolverError::Unavailable(store.to_string()),
        }
    }
}
