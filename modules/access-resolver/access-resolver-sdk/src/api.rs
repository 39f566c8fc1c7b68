//! Public API trait for the access resolver.

use std::collections::HashSet;

use async_trait::async_trait;
use koveo_security::Action;

use crate::error::AccessResolverError;
use crate::models::{BuildingId, OrganizationId, PrincipalId, ResidenceId};

/// Access decisions for one principal against the organization hierarchy.
///
/// `Ok(false)` is a denial, including for principals or targets that do not
/// exist. `Err` means the decision could not be made and must be handled as
/// a denial by the caller.
#[async_trait]
pub trait AccessResolverClient: Send + Sync {
    /// Organization ids the principal may see. Always contains the Demo
    /// organization when it exists and the principal is known.
    ///
    /// # Errors
    /// `AccessResolverError::Unavailable` when the read store fails.
    async fn accessible_organizations(
        &self,
        principal_id: PrincipalId,
    ) -> Result<HashSet<OrganizationId>, AccessResolverError>;

    /// # Errors
    /// `AccessResolverError::Unavailable` when the read store fails.
    async fn can_access_organization(
        &self,
        principal_id: PrincipalId,
        organization_id: OrganizationId,
    ) -> Result<bool, AccessResolverError>;

    /// Building access is derived from its owning organization.
    ///
    /// # Errors
    /// `AccessResolverError::Unavailable` when the read store fails.
    async fn can_access_building(
        &self,
        principal_id: PrincipalId,
        building_id: BuildingId,
    ) -> Result<bool, AccessResolverError>;

    /// Privileged roles reach residences through the building's organization;
    /// residents and tenants only through their own residence memberships.
    ///
    /// # Errors
    /// `AccessResolverError::Unavailable` when the read store fails.
    async fn can_access_residence(
        &self,
        principal_id: PrincipalId,
        residence_id: ResidenceId,
    ) -> Result<bool, AccessResolverError>;

    /// `false` when the principal belongs to the read-only cohort. `true` only
    /// means "not categorically blocked"; the capability policy still applies.
    ///
    /// # Errors
    /// `AccessResolverError::Unavailable` when the read store fails.
    async fn can_perform_write_operation(
        &self,
        principal_id: PrincipalId,
        action: Action,
    ) -> Result<bool, AccessResolverError>;
}
