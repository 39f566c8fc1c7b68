#![allow(dead_code)]

use std::sync::Arc;

use access_resolver::config::AccessResolverConfig;
use access_resolver::domain::AccessResolver;
use access_resolver::infra::storage::InMemoryAccessStore;
use access_resolver_sdk::{
    Building, BuildingId, Organization, OrganizationId, OrganizationMembership, PrincipalId,
    Residence, ResidenceId, ResidenceMembership,
};
use koveo_security::{Principal, Role};
use uuid::Uuid;

/// Small hierarchy shared by the integration tests:
///
/// - `Demo` (baseline-visible) with one building
/// - `Maple` with two buildings, three residences
/// - `Harbour` with one building, one residence
/// - `Dormant`, inactive
pub struct Campus {
    pub store: Arc<InMemoryAccessStore>,
    pub demo: OrganizationId,
    pub maple: OrganizationId,
    pub harbour: OrganizationId,
    pub dormant: OrganizationId,
    pub demo_building: BuildingId,
    pub maple_north: BuildingId,
    pub maple_south: BuildingId,
    pub harbour_tower: BuildingId,
    pub north_101: ResidenceId,
    pub north_102: ResidenceId,
    pub south_201: ResidenceId,
    pub tower_301: ResidenceId,
}

impl Campus {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryAccessStore::new());
        let demo = add_organization(&store, "Demo", true);
        let maple = add_organization(&store, "Maple Management", true);
        let harbour = add_organization(&store, "Harbour Holdings", true);
        let dormant = add_organization(&store, "Dormant Estates", false);

        let demo_building = add_building(&store, demo, "Showroom");
        let maple_north = add_building(&store, maple, "Maple North");
        let maple_south = add_building(&store, maple, "Maple South");
        let harbour_tower = add_building(&store, harbour, "Harbour Tower");

        let north_101 = add_residence(&store, maple_north, "101");
        let north_102 = add_residence(&store, maple_north, "102");
        let south_201 = add_residence(&store, maple_south, "201");
        let tower_301 = add_residence(&store, harbour_tower, "301");

        Self {
            store,
            demo,
            maple,
            harbour,
            dormant,
            demo_building,
            maple_north,
            maple_south,
            harbour_tower,
            north_101,
            north_102,
            south_201,
            tower_301,
        }
    }

    pub fn resolver(&self) -> AccessResolver {
        AccessResolver::new(self.store.clone(), AccessResolverConfig::default())
    }

    pub fn principal(&self, role: Role) -> PrincipalId {
        let id = Uuid::new_v4();
        self.store.insert_principal(Principal::new(id, role));
        id
    }

    pub fn join(&self, principal_id: PrincipalId, organization_id: OrganizationId) {
        self.store
            .insert_organization_membership(OrganizationMembership {
                principal_id,
                organization_id,
                is_active: true,
                can_access_all_organizations: false,
            });
    }

    pub fn join_with_override(&self, principal_id: PrincipalId, organization_id: OrganizationId) {
        self.store
            .insert_organization_membership(OrganizationMembership {
                principal_id,
                organization_id,
                is_active: true,
                can_access_all_organizations: true,
            });
    }

    pub fn occupy(&self, principal_id: PrincipalId, residence_id: ResidenceId, active: bool) {
        self.store.insert_residence_membership(ResidenceMembership {
            principal_id,
            residence_id,
            relationship_type: "tenant".to_owned(),
            start_date: None,
            end_date: None,
            is_active: active,
        });
    }

    pub fn add_organization(&self, name: &str, active: bool) -> OrganizationId {
        add_organization(&self.store, name, active)
    }

    pub fn organizations(&self) -> Vec<Organization> {
        [self.demo, self.maple, self.harbour, self.dormant]
            .into_iter()
            .map(|id| Organization {
                id,
                name: String::new(),
                is_active: id != self.dormant,
                is_globally_privileged: false,
            })
            .collect()
    }

    pub fn buildings(&self) -> Vec<Building> {
        [
            (self.demo_building, self.demo),
            (self.maple_north, self.maple),
            (self.maple_south, self.maple),
            (self.harbour_tower, self.harbour),
        ]
        .into_iter()
        .map(|(id, organization_id)| Building {
            id,
            organization_id,
            name: String::new(),
            is_active: true,
        })
        .collect()
    }

    pub fn residences(&self) -> Vec<Residence> {
        [
            (self.north_101, self.maple_north),
            (self.north_102, self.maple_north),
            (self.south_201, self.maple_south),
            (self.tower_301, self.harbour_tower),
        ]
        .into_iter()
        .map(|(id, building_id)| Residence {
            id,
            building_id,
            unit_number: String::new(),
            is_active: true,
        })
        .collect()
    }
}

fn add_organization(store: &InMemoryAccessStore, name: &str, active: bool) -> OrganizationId {
    let id = Uuid::new_v4();
    store.insert_organization(Organization {
        id,
        name: name.to_owned(),
        is_active: active,
        is_globally_privileged: false,
    });
    id
}

fn add_building(
    store: &InMemoryAccessStore,
    organization_id: OrganizationId,
    name: &str,
) -> BuildingId {
    let id = Uuid::new_v4();
    store.insert_building(Building {
        id,
        organization_id,
        name: name.to_owned(),
        is_active: true,
    });
    id
}

fn add_residence(store: &InMemoryAccessStore, building_id: BuildingId, unit: &str) -> ResidenceId {
    let id = Uuid::new_v4();
    store.insert_residence(Residence {
        id,
        building_id,
        unit_number: unit.to_owned(),
        is_active: true,
    });
    id
}
