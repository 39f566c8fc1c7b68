//! In-memory filtering of already-loaded collections.
//!
//! Query-level filtering of the same rules lives in
//! [`crate::infra::storage::SeaOrmAccessRepository`]; both take their
//! answers from one [`PrincipalScope`].

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use access_resolver_sdk::{Building, BuildingId, Organization, OrganizationId, Residence};
use koveo_security::ResourceKind;
use uuid::Uuid;

use crate::domain::error::StoreError;
use crate::domain::repo::AccessRepository;
use crate::domain::scope::{PrincipalScope, ResidenceAccess};

/// Where a resource hangs in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    /// The organization that decides access (the resource itself for organizations).
    Organization(OrganizationId),
    Building(BuildingId),
}

/// A record the filter can place in the organization hierarchy.
pub trait ScopedResource {
    const KIND: ResourceKind;

    fn resource_id(&self) -> Uuid;

    fn owner(&self) -> Owner;
}

impl ScopedResource for Organization {
    const KIND: ResourceKind = ResourceKind::Organization;

    fn resource_id(&self) -> Uuid {
        self.id
    }

    fn owner(&self) -> Owner {
        Owner::Organization(self.id)
    }
}

impl ScopedResource for Building {
    const KIND: ResourceKind = ResourceKind::Building;

    fn resource_id(&self) -> Uuid {
        self.id
    }

    fn owner(&self) -> Owner {
        Owner::Organization(self.organization_id)
    }
}

impl ScopedResource for Residence {
    const KIND: ResourceKind = ResourceKind::Residence;

    fn resource_id(&self) -> Uuid {
        self.id
    }

    fn owner(&self) -> Owner {
        Owner::Building(self.building_id)
    }
}

/// Building id to owning organization id, loaded in one batched read.
#[derive(Debug, Clone, Default)]
pub struct BuildingIndex {
    owners: HashMap<BuildingId, OrganizationId>,
}

impl BuildingIndex {
    /// # Errors
    /// Propagates the store failure; callers decide how to fail closed.
    pub async fn load(
        repo: &dyn AccessRepository,
        building_ids: impl IntoIterator<Item = BuildingId>,
    ) -> Result<Self, StoreError> {
        let ids: Vec<BuildingId> = building_ids
            .into_iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        if ids.is_empty() {
            return Ok(Self::default());
        }
        let owners = repo.building_organizations(&ids).await?;
        Ok(Self { owners })
    }

    #[must_use]
    pub fn organization_of(&self, building_id: BuildingId) -> Option<OrganizationId> {
        self.owners.get(&building_id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

/// Keeps the candidates a [`PrincipalScope`] can reach, preserving order.
///
/// Applying the filter to its own output returns it unchanged.
#[derive(Clone)]
pub struct ResourceFilter {
    repo: Arc<dyn AccessRepository>,
}

impl ResourceFilter {
    #[must_use]
    pub fn new(repo: Arc<dyn AccessRepository>) -> Self {
        Self { repo }
    }

    /// # Errors
    /// Returns the store failure when building owners cannot be loaded.
    pub async fn apply<R>(
        &self,
        scope: &PrincipalScope,
        candidates: Vec<R>,
    ) -> Result<Vec<R>, StoreError>
    where
        R: ScopedResource + Send,
    {
        if scope.is_empty() || candidates.is_empty() {
            return Ok(Vec::new());
        }

        if R::KIND == ResourceKind::Residence
            && let ResidenceAccess::Memberships(ids) = scope.residence_access()
        {
            return Ok(candidates
                .into_iter()
                .filter(|c| ids.contains(&c.resource_id()))
                .collect());
        }

        let index = BuildingIndex::load(
            self.repo.as_ref(),
            candidates.iter().filter_map(|c| match c.owner() {
                Owner::Building(b) => Some(b),
                Owner::Organization(_) => None,
            }),
        )
        .await?;

        Ok(candidates
            .into_iter()
            .filter(|c| {
                let organization = match c.owner() {
                    Owner::Organization(o) => Some(o),
                    Owner::Building(b) => index.organization_of(b),
                };
                organization.is_some_and(|o| scope.contains_organization(o))
            })
            .collect())
    }
}
