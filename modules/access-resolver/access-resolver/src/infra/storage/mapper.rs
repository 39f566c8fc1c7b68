//! Row to read-model conversions.

use access_resolver_sdk::{
    Building, Organization, OrganizationMembership, Residence, ResidenceMembership,
};
use koveo_security::{Principal, Role};

use super::entity::{
    building, organization, organization_membership, principal, residence, residence_membership,
};
use crate::domain::StoreError;

impl From<organization::Model> for Organization {
    fn from(m: organization::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            is_active: m.is_active,
            is_globally_privileged: m.is_globally_privileged,
        }
    }
}

impl From<building::Model> for Building {
    fn from(m: building::Model) -> Self {
        Self {
            id: m.id,
            organization_id: m.organization_id,
            name: m.name,
            is_active: m.is_active,
        }
    }
}

impl From<residence::Model> for Residence {
    fn from(m: residence::Model) -> Self {
        Self {
            id: m.id,
            building_id: m.building_id,
            unit_number: m.unit_number,
            is_active: m.is_active,
        }
    }
}

impl From<organization_membership::Model> for OrganizationMembership {
    fn from(m: organization_membership::Model) -> Self {
        Self {
            principal_id: m.principal_id,
            organization_id: m.organization_id,
            is_active: m.is_active,
            can_access_all_organizations: m.can_access_all_organizations,
        }
    }
}

impl From<residence_membership::Model> for ResidenceMembership {
    fn from(m: residence_membership::Model) -> Self {
        Self {
            principal_id: m.principal_id,
            residence_id: m.residence_id,
            relationship_type: m.relationship_type,
            start_date: m.start_date,
            end_date: m.end_date,
            is_active: m.is_active,
        }
    }
}

impl TryFrom<principal::Model> for Principal {
    type Error = StoreError;

    fn try_from(m: principal::Model) -> Result<Self, Self::Error> {
        let role: Role = m.role.parse().map_err(|e| StoreError::Corrupt {
            entity: "principal",
            id: m.id,
            reason: format!("{e}"),
        })?;
        Ok(Principal::new(m.id, role).with_active(m.is_active))
    }
}
