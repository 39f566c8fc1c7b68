use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use access_resolver_sdk::{
    Building, BuildingId, Organization, OrganizationId, OrganizationMembership, PrincipalId,
    Residence, ResidenceId,
};
use koveo_security::Action;
use tracing::{debug, error};

use crate::config::AccessResolverConfig;
use crate::domain::error::DomainError;
use crate::domain::filter::{ResourceFilter, ScopedResource};
use crate::domain::repo::AccessRepository;
use crate::domain::scope::{PrincipalScope, ResidenceAccess};

/// Resolves what a principal may reach in the organization hierarchy.
///
/// Stateless between calls: every answer is computed from the repository.
/// Two flavours of every check exist:
/// - `evaluate_*` return `Result` so callers can tell a denial from a failure;
/// - `can_*` and `accessible_*` fail closed, logging the error and answering
///   `false` or an empty set.
#[derive(Clone)]
pub struct AccessResolver {
    repo: Arc<dyn AccessRepository>,
    config: AccessResolverConfig,
    filter: ResourceFilter,
}

fn fail_closed<T: Default>(
    op: &'static str,
    principal_id: PrincipalId,
    result: Result<T, DomainError>,
) -> T {
    result.unwrap_or_else(|e| {
        error!(operation = op, %principal_id, error = ?e, "access check failed, denying");
        T::default()
    })
}

impl AccessResolver {
    #[must_use]
    pub fn new(repo: Arc<dyn AccessRepository>, config: AccessResolverConfig) -> Self {
        let filter = ResourceFilter::new(Arc::clone(&repo));
        Self {
            repo,
            config,
            filter,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AccessResolverConfig {
        &self.config
    }

    /// Snapshot everything needed to answer checks for `principal_id`.
    ///
    /// Unknown and inactive principals get [`PrincipalScope::empty`]; an
    /// inactive principal does not even see the Demo organization.
    ///
    /// # Errors
    /// Returns `DomainError::Store` when any read fails.
    pub async fn scope_for(&self, principal_id: PrincipalId) -> Result<PrincipalScope, DomainError> {
        let Some(principal) = self.repo.find_principal(principal_id).await? else {
            debug!(%principal_id, "unknown principal");
            return Ok(PrincipalScope::empty());
        };
        if !principal.is_active() {
            debug!(%principal_id, "inactive principal");
            return Ok(PrincipalScope::empty());
        }

        let memberships = self.repo.active_organization_memberships(principal_id).await?;
        let member_org_ids: Vec<OrganizationId> =
            memberships.iter().map(|m| m.organization_id).collect();
        let organizations = if member_org_ids.is_empty() {
            Vec::new()
        } else {
            self.repo.find_organizations(&member_org_ids).await?
        };
        let by_id: HashMap<OrganizationId, &Organization> =
            organizations.iter().map(|o| (o.id, o)).collect();

        let read_only = by_id
            .values()
            .any(|o| self.config.is_read_only_organization(&o.name));

        let visible = self.visible_organizations(&memberships, &by_id).await?;

        let residences = if principal.is_privileged() {
            ResidenceAccess::ThroughOrganizations
        } else {
            let ids = self.repo.active_residence_ids(principal_id).await?;
            ResidenceAccess::Memberships(ids.into_iter().collect())
        };

        debug!(
            %principal_id,
            role = %principal.role(),
            organizations = visible.len(),
            read_only,
            "principal scope resolved"
        );
        Ok(PrincipalScope::new(principal, visible, residences, read_only))
    }

    /// Demo, plus either every active organization (global visibility) or the
    /// principal's own organizations.
    async fn visible_organizations(
        &self,
        memberships: &[OrganizationMembership],
        by_id: &HashMap<OrganizationId, &Organization>,
    ) -> Result<HashSet<OrganizationId>, DomainError> {
        let mut visible = HashSet::new();

        if let Some(demo) = self
            .repo
            .find_organization_by_name(&self.config.demo_organization_name)
            .await?
        {
            visible.insert(demo.id);
        }

        for membership in memberships {
            let organization = by_id.get(&membership.organization_id);
            if membership.can_access_all_organizations
                || organization.is_some_and(|o| self.grants_global_visibility(o))
            {
                debug!(
                    principal_id = %membership.principal_id,
                    organization_id = %membership.organization_id,
                    "membership grants global visibility"
                );
                visible.extend(self.repo.active_organization_ids().await?);
                return Ok(visible);
            }
            visible.insert(membership.organization_id);
        }

        Ok(visible)
    }

    fn grants_global_visibility(&self, organization: &Organization) -> bool {
        organization.is_globally_privileged
            || self.config.is_legacy_privileged_name(&organization.name)
    }

    /// # Errors
    /// Returns `DomainError::Store` when the building lookup fails.
    pub async fn building_in_scope(
        &self,
        scope: &PrincipalScope,
        building_id: BuildingId,
    ) -> Result<bool, DomainError> {
        if scope.is_empty() {
            return Ok(false);
        }
        let building = self.repo.find_building(building_id).await?;
        Ok(building.is_some_and(|b| scope.contains_organization(b.organization_id)))
    }

    /// # Errors
    /// Returns `DomainError::Store` when the residence or building lookup fails.
    pub async fn residence_in_scope(
        &self,
        scope: &PrincipalScope,
        residence_id: ResidenceId,
    ) -> Result<bool, DomainError> {
        if scope.is_empty() {
            return Ok(false);
        }
        match scope.residence_access() {
            ResidenceAccess::Memberships(ids) => Ok(ids.contains(&residence_id)),
            ResidenceAccess::ThroughOrganizations => {
                let Some(residence) = self.repo.find_residence(residence_id).await? else {
                    return Ok(false);
                };
                self.building_in_scope(scope, residence.building_id).await
            }
        }
    }

    /// Whether a scope is categorically blocked from writing.
    #[must_use]
    pub fn write_allowed(scope: &PrincipalScope) -> bool {
        !scope.is_empty() && !scope.is_read_only()
    }

    /// # Errors
    /// Returns `DomainError::Store` when any read fails.
    pub async fn evaluate_organization(
        &self,
        principal_id: PrincipalId,
        organization_id: OrganizationId,
    ) -> Result<bool, DomainError> {
        let scope = self.scope_for(principal_id).await?;
        let allowed = scope.contains_organization(organization_id);
        debug!(%principal_id, %organization_id, allowed, "organization access");
        Ok(allowed)
    }

    /// # Errors
    /// Returns `DomainError::Store` when any read fails.
    pub async fn evaluate_building(
        &self,
        principal_id: PrincipalId,
        building_id: BuildingId,
    ) -> Result<bool, DomainError> {
        let scope = self.scope_for(principal_id).await?;
        let allowed = self.building_in_scope(&scope, building_id).await?;
        debug!(%principal_id, %building_id, allowed, "building access");
        Ok(allowed)
    }

    /// # Errors
    /// Returns `DomainError::Store` when any read fails.
    pub async fn evaluate_residence(
        &self,
        principal_id: PrincipalId,
        residence_id: ResidenceId,
    ) -> Result<bool, DomainError> {
        let scope = self.scope_for(principal_id).await?;
        let allowed = self.residence_in_scope(&scope, residence_id).await?;
        debug!(%principal_id, %residence_id, allowed, "residence access");
        Ok(allowed)
    }

    /// Read-only cohort members are refused every action, reads included.
    ///
    /// # Errors
    /// Returns `DomainError::Store` when any read fails.
    pub async fn evaluate_write(
        &self,
        principal_id: PrincipalId,
        action: Action,
    ) -> Result<bool, DomainError> {
        let scope = self.scope_for(principal_id).await?;
        let allowed = Self::write_allowed(&scope);
        debug!(%principal_id, %action, allowed, "write eligibility");
        Ok(allowed)
    }

    pub async fn accessible_organizations(
        &self,
        principal_id: PrincipalId,
    ) -> HashSet<OrganizationId> {
        fail_closed(
            "accessible_organizations",
            principal_id,
            self.scope_for(principal_id)
                .await
                .map(PrincipalScope::into_organizations),
        )
    }

    pub async fn can_access_organization(
        &self,
        principal_id: PrincipalId,
        organization_id: OrganizationId,
    ) -> bool {
        fail_closed(
            "can_access_organization",
            principal_id,
            self.evaluate_organization(principal_id, organization_id)
                .await,
        )
    }

    pub async fn can_access_building(
        &self,
        principal_id: PrincipalId,
        building_id: BuildingId,
    ) -> bool {
        fail_closed(
            "can_access_building",
            principal_id,
            self.evaluate_building(principal_id, building_id).await,
        )
    }

    pub async fn can_access_residence(
        &self,
        principal_id: PrincipalId,
        residence_id: ResidenceId,
    ) -> bool {
        fail_closed(
            "can_access_residence",
            principal_id,
            self.evaluate_residence(principal_id, residence_id).await,
        )
    }

    /// `true` only means "not categorically blocked"; the capability policy
    /// decides the rest.
    pub async fn can_perform_write_operation(
        &self,
        principal_id: PrincipalId,
        action: Action,
    ) -> bool {
        fail_closed(
            "can_perform_write_operation",
            principal_id,
            self.evaluate_write(principal_id, action).await,
        )
    }

    /// # Errors
    /// Returns `DomainError::Store` when the listing fails.
    pub async fn list_organizations(
        &self,
        scope: &PrincipalScope,
    ) -> Result<Vec<Organization>, DomainError> {
        Ok(self.repo.list_organizations(&scope.organization_scope()).await?)
    }

    /// # Errors
    /// Returns `DomainError::Store` when the listing fails.
    pub async fn list_buildings(&self, scope: &PrincipalScope) -> Result<Vec<Building>, DomainError> {
        Ok(self.repo.list_buildings(&scope.building_scope()).await?)
    }

    /// # Errors
    /// Returns `DomainError::Store` when the listing fails.
    pub async fn list_residences(
        &self,
        scope: &PrincipalScope,
    ) -> Result<Vec<Residence>, DomainError> {
        Ok(self.repo.list_residences(&scope.residence_scope()).await?)
    }

    pub async fn accessible_buildings(&self, principal_id: PrincipalId) -> HashSet<BuildingId> {
        let result = async {
            let scope = self.scope_for(principal_id).await?;
            let buildings = self.list_buildings(&scope).await?;
            Ok::<HashSet<BuildingId>, DomainError>(buildings.into_iter().map(|b| b.id).collect())
        }
        .await;
        fail_closed("accessible_buildings", principal_id, result)
    }

    pub async fn accessible_residences(&self, principal_id: PrincipalId) -> HashSet<ResidenceId> {
        let result = async {
            let scope = self.scope_for(principal_id).await?;
            let residences = self.list_residences(&scope).await?;
            Ok::<HashSet<ResidenceId>, DomainError>(residences.into_iter().map(|r| r.id).collect())
        }
        .await;
        fail_closed("accessible_residences", principal_id, result)
    }

    /// # Errors
    /// Returns `DomainError::Store` when building owners cannot be loaded.
    pub async fn filter_in_scope<R>(
        &self,
        scope: &PrincipalScope,
        candidates: Vec<R>,
    ) -> Result<Vec<R>, DomainError>
    where
        R: ScopedResource + Send,
    {
        Ok(self.filter.apply(scope, candidates).await?)
    }

    /// Keep only the candidates the principal can reach.
    pub async fn filter_by_access<R>(&self, principal_id: PrincipalId, candidates: Vec<R>) -> Vec<R>
    where
        R: ScopedResource + Send,
    {
        let result = async {
            let scope = self.scope_for(principal_id).await?;
            self.filter_in_scope(&scope, candidates).await
        }
        .await;
        fail_closed("filter_by_access", principal_id, result)
    }
}
