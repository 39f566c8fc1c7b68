//! Access Resolver SDK
//!
//! Public surface of the `access-resolver` module:
//!
//! - [`AccessResolverClient`] - decision API consumed by route handlers and the gate
//! - [`Organization`], [`Building`], [`Residence`] and membership records - read models
//! - [`AccessResolverError`] - error type
//!
//! ## Usage
//!
//! ```ignore
//! use access_resolver_sdk::AccessResolverClient;
//!
//! let allowed = resolver.can_access_building(principal_id, building_id).await?;
//! let orgs = resolver.accessible_organizations(principal_id).await?;
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod error;
pub mod models;

pub use api::AccessResolverClient;
pub use error::AccessResolverError;
pub use models::{
    Building, BuildingId, Organization, OrganizationId, OrganizationMembership, PrincipalId,
    Residence, ResidenceId, ResidenceMembership,
};
