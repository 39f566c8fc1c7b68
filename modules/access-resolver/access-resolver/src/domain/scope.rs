//! Per-request snapshot of what a principal can reach.

use std::collections::HashSet;

use access_resolver_sdk::{OrganizationId, ResidenceId};
use koveo_security::{AccessScope, Principal};

/// How residences become visible to a principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResidenceAccess {
    /// Privileged roles: any residence whose building sits in an accessible organization.
    ThroughOrganizations,
    /// Everyone else: only residences with an active membership, regardless
    /// of organization membership.
    Memberships(HashSet<ResidenceId>),
}

/// Everything the resolver needs to answer checks for one principal.
///
/// Built once per request by [`crate::domain::AccessResolver::scope_for`] and
/// reused across every candidate so the organization set is not recomputed.
/// A scope without a principal (unknown or inactive) denies everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalScope {
    principal: Option<Principal>,
    organizations: HashSet<OrganizationId>,
    residences: ResidenceAccess,
    read_only: bool,
}

impl PrincipalScope {
    /// Scope that grants nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            principal: None,
            organizations: HashSet::new(),
            residences: ResidenceAccess::Memberships(HashSet::new()),
            read_only: false,
        }
    }

    #[must_use]
    pub fn new(
        principal: Principal,
        organizations: HashSet<OrganizationId>,
        residences: ResidenceAccess,
        read_only: bool,
    ) -> Self {
        Self {
            principal: Some(principal),
            organizations,
            residences,
            read_only,
        }
    }

    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    #[must_use]
    pub fn organizations(&self) -> &HashSet<OrganizationId> {
        &self.organizations
    }

    #[must_use]
    pub fn into_organizations(self) -> HashSet<OrganizationId> {
        self.organizations
    }

    #[must_use]
    pub fn residence_access(&self) -> &ResidenceAccess {
        &self.residences
    }

    #[must_use]
    pub fn contains_organization(&self, id: OrganizationId) -> bool {
        self.organizations.contains(&id)
    }

    /// Principal belongs to the read-only cohort.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.principal.is_none()
    }

    /// Query-level scope for organization rows.
    #[must_use]
    pub fn organization_scope(&self) -> AccessScope {
        AccessScope::organizations_only(self.organizations.iter().copied())
    }

    /// Query-level scope for building rows; buildings follow their organization.
    #[must_use]
    pub fn building_scope(&self) -> AccessScope {
        self.organization_scope()
    }

    /// Query-level scope for residence rows.
    #[must_use]
    pub fn residence_scope(&self) -> AccessScope {
        if self.principal.is_none() {
            return AccessScope::deny_all();
        }
        match &self.residences {
            ResidenceAccess::ThroughOrganizations => self.organization_scope(),
            ResidenceAccess::Memberships(ids) => AccessScope::resources_only(ids.iter().copied()),
        }
    }
}
