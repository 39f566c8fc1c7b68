use std::collections::HashMap;

use access_resolver_sdk::{
    Building, BuildingId, Organization, OrganizationId, OrganizationMembership, PrincipalId,
    Residence, ResidenceId,
};
use async_trait::async_trait;
use koveo_security::{AccessScope, Principal};

use crate::domain::error::StoreError;

/// Read accessor over principals, the organization hierarchy, and memberships.
///
/// Implementations must tolerate concurrent calls; the resolver holds no
/// locks of its own.
#[async_trait]
pub trait AccessRepository: Send + Sync {
    async fn find_principal(&self, id: PrincipalId) -> Result<Option<Principal>, StoreError>;

    /// Only memberships whose `is_active` flag is set.
    async fn active_organization_memberships(
        &self,
        principal_id: PrincipalId,
    ) -> Result<Vec<OrganizationMembership>, StoreError>;

    /// Batch lookup; unknown ids are skipped.
    async fn find_organizations(
        &self,
        ids: &[OrganizationId],
    ) -> Result<Vec<Organization>, StoreError>;

    /// Exact, case-sensitive lookup by name. When several organizations share
    /// the name, the one with the lowest id is returned.
    async fn find_organization_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Organization>, StoreError>;

    async fn active_organization_ids(&self) -> Result<Vec<OrganizationId>, StoreError>;

    async fn find_building(&self, id: BuildingId) -> Result<Option<Building>, StoreError>;

    async fn find_residence(&self, id: ResidenceId) -> Result<Option<Residence>, StoreError>;

    /// Owning organization of each known building, in one round trip.
    async fn building_organizations(
        &self,
        building_ids: &[BuildingId],
    ) -> Result<HashMap<BuildingId, OrganizationId>, StoreError>;

    /// Residence ids from the principal's active residence memberships.
    async fn active_residence_ids(
        &self,
        principal_id: PrincipalId,
    ) -> Result<Vec<ResidenceId>, StoreError>;

    /// Organizations inside `scope`, matched on their own id.
    async fn list_organizations(&self, scope: &AccessScope)
    -> Result<Vec<Organization>, StoreError>;

    /// Buildings inside `scope`, matched on their owning organization or own id.
    async fn list_buildings(&self, scope: &AccessScope) -> Result<Vec<Building>, StoreError>;

    /// Residences inside `scope`: organization ids resolve through the owning
    /// building, resource ids match the residence id.
    async fn list_residences(&self, scope: &AccessScope) -> Result<Vec<Residence>, StoreError>;
}
