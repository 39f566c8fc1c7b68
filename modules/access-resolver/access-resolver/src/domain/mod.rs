//! Domain layer for the access resolver.

pub mod error;
pub mod filter;
pub mod local_client;
pub mod repo;
pub mod scope;
pub mod service;

pub use error::{DomainError, StoreError};
pub use filter::{BuildingIndex, Owner, ResourceFilter, ScopedResource};
pub use local_client::AccessResolverLocalClient;
pub use repo::AccessRepository;
pub use scope::{PrincipalScope, ResidenceAccess};
pub use service::AccessResolver;
