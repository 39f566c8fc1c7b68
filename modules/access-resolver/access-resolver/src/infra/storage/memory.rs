//! In-process read store for tests and local development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use access_resolver_sdk::{
    Building, BuildingId, Organization, OrganizationId, OrganizationMembership, PrincipalId,
    Residence, ResidenceId, ResidenceMembership,
};
use async_trait::async_trait;
use koveo_security::{AccessScope, Principal};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::{AccessRepository, StoreError};

#[derive(Default)]
struct Tables {
    principals: HashMap<PrincipalId, Principal>,
    organizations: HashMap<OrganizationId, Organization>,
    buildings: HashMap<BuildingId, Building>,
    residences: HashMap<ResidenceId, Residence>,
    organization_memberships: Vec<OrganizationMembership>,
    residence_memberships: Vec<ResidenceMembership>,
}

/// Same rules as the `SQL` scope conditions: empty scope matches nothing,
/// each present dimension must match.
fn in_scope(scope: &AccessScope, organization_id: Option<OrganizationId>, id: Uuid) -> bool {
    if scope.is_empty() {
        return false;
    }
    let organization_ok = !scope.has_organizations()
        || organization_id.is_some_and(|o| scope.contains_organization(o));
    let resource_ok = !scope.has_resources() || scope.contains_resource(id);
    organization_ok && resource_ok
}

/// Thread-safe store backed by hash maps.
///
/// [`InMemoryAccessStore::set_unavailable`] makes every read fail, for
/// exercising fail-closed paths.
#[derive(Default)]
pub struct InMemoryAccessStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl InMemoryAccessStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_principal(&self, principal: Principal) {
        self.tables
            .write()
            .principals
            .insert(principal.id(), principal);
    }

    pub fn insert_organization(&self, organization: Organization) {
        self.tables
            .write()
            .organizations
            .insert(organization.id, organization);
    }

    pub fn insert_building(&self, building: Building) {
        self.tables.write().buildings.insert(building.id, building);
    }

    pub fn insert_residence(&self, residence: Residence) {
        self.tables
            .write()
            .residences
            .insert(residence.id, residence);
    }

    pub fn insert_organization_membership(&self, membership: OrganizationMembership) {
        self.tables.write().organization_memberships.push(membership);
    }

    pub fn insert_residence_membership(&self, membership: ResidenceMembership) {
        self.tables.write().residence_memberships.push(membership);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory store switched off".to_owned(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl AccessRepository for InMemoryAccessStore {
    async fn find_principal(&self, id: PrincipalId) -> Result<Option<Principal>, StoreError> {
        self.check()?;
        Ok(self.tables.read().principals.get(&id).cloned())
    }

    async fn active_organization_memberships(
        &self,
        principal_id: PrincipalId,
    ) -> Result<Vec<OrganizationMembership>, StoreError> {
        self.check()?;
        Ok(self
            .tables
            .read()
            .organization_memberships
            .iter()
            .filter(|m| m.principal_id == principal_id && m.is_active)
            .cloned()
            .collect())
    }

    async fn find_organizations(
        &self,
        ids: &[OrganizationId],
    ) -> Result<Vec<Organization>, StoreError> {
        self.check()?;
        let tables = self.tables.read();
        Ok(ids
            .iter()
            .filter_map(|id| tables.organizations.get(id).cloned())
            .collect())
    }

    async fn find_organization_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Organization>, StoreError> {
        self.check()?;
        Ok(self
            .tables
            .read()
            .organizations
            .values()
            .filter(|o| o.name == name)
            .min_by_key(|o| o.id)
            .cloned())
    }

    async fn active_organization_ids(&self) -> Result<Vec<OrganizationId>, StoreError> {
        self.check()?;
        Ok(self
            .tables
            .read()
            .organizations
            .values()
            .filter(|o| o.is_active)
            .map(|o| o.id)
            .collect())
    }

    async fn find_building(&self, id: BuildingId) -> Result<Option<Building>, StoreError> {
        self.check()?;
        Ok(self.tables.read().buildings.get(&id).cloned())
    }

    async fn find_residence(&self, id: ResidenceId) -> Result<Option<Residence>, StoreError> {
        self.check()?;
        Ok(self.tables.read().residences.get(&id).cloned())
    }

    async fn building_organizations(
        &self,
        building_ids: &[BuildingId],
    ) -> Result<HashMap<BuildingId, OrganizationId>, StoreError> {
        self.check()?;
        let tables = self.tables.read();
        Ok(building_ids
            .iter()
            .filter_map(|id| tables.buildings.get(id).map(|b| (b.id, b.organization_id)))
            .collect())
    }

    async fn active_residence_ids(
        &self,
        principal_id: PrincipalId,
    ) -> Result<Vec<ResidenceId>, StoreError> {
        self.check()?;
        Ok(self
            .tables
            .read()
            .residence_memberships
            .iter()
            .filter(|m| m.principal_id == principal_id && m.is_active)
            .map(|m| m.residence_id)
            .collect())
    }

    async fn list_organizations(
        &self,
        scope: &AccessScope,
    ) -> Result<Vec<Organization>, StoreError> {
        self.check()?;
        let mut rows: Vec<Organization> = self
            .tables
            .read()
            .organizations
            .values()
            .filter(|o| in_scope(scope, Some(o.id), o.id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn list_buildings(&self, scope: &AccessScope) -> Result<Vec<Building>, StoreError> {
        self.check()?;
        let mut rows: Vec<Building> = self
            .tables
            .read()
            .buildings
            .values()
            .filter(|b| in_scope(scope, Some(b.organization_id), b.id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn list_residences(&self, scope: &AccessScope) -> Result<Vec<Residence>, StoreError> {
        self.check()?;
        let tables = self.tables.read();
        let mut rows: Vec<Residence> = tables
            .residences
            .values()
            .filter(|r| {
                let organization = tables.buildings.get(&r.building_id).map(|b| b.organization_id);
                in_scope(scope, organization, r.id)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.unit_number.cmp(&b.unit_number));
        Ok(rows)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn organization(store: &InMemoryAccessStore, id: Uuid, name: &str) {
        store.insert_organization(Organization {
            id,
            name: name.to_owned(),
            is_active: true,
            is_globally_privileged: false,
        });
    }

    #[tokio::test]
    async fn name_lookup_is_exact_and_stable() {
        let store = InMemoryAccessStore::new();
        let low = Uuid::from_u128(1);
        let high = Uuid::from_u128(2);
        organization(&store, high, "Demo");
        organization(&store, Uuid::from_u128(3), "demo");
        organization(&store, low, "Demo");

        for _ in 0..8 {
            let found = store.find_organization_by_name("Demo").await.unwrap();
            assert_eq!(found.map(|o| o.id), Some(low));
        }
        assert!(store.find_organization_by_name("DEMO").await.unwrap().is_none());
    }
}
