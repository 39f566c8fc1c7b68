//! Local (in-process) client for the access resolver.

use std::collections::HashSet;
use std::sync::Arc;

use access_resolver_sdk::{
    AccessResolverClient, AccessResolverError, BuildingId, OrganizationId, PrincipalId,
    ResidenceId,
};
use async_trait::async_trait;
use koveo_security::Action;

use super::{AccessResolver, DomainError, PrincipalScope};

/// Exposes [`AccessResolver`] through the SDK trait, keeping failures
/// distinguishable from denials.
#[derive(Clone)]
pub struct AccessResolverLocalClient {
    svc: Arc<AccessResolver>,
}

impl AccessResolverLocalClient {
    #[must_use]
    pub fn new(svc: Arc<AccessResolver>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> AccessResolverError {
    tracing::error!(operation = op, error = ?e, "access-resolver call failed");
    e.into()
}

#[async_trait]
impl AccessResolverClient for AccessResolverLocalClient {
    async fn accessible_organizations(
        &self,
        principal_id: PrincipalId,
    ) -> Result<HashSet<OrganizationId>, AccessResolverError> {
        self.svc
            .scope_for(principal_id)
            .await
            .map(PrincipalScope::into_organizations)
            .map_err(|e| log_and_convert("accessible_organizations", e))
    }

    async fn can_access_organization(
        &self,
        principal_id: PrincipalId,
        organization_id: OrganizationId,
    ) -> Result<bool, AccessResolverError> {
        self.svc
            .evaluate_organization(principal_id, organization_id)
            .await
            .map_err(|e| log_and_convert("can_access_organization", e))
    }

    async fn can_access_building(
        &self,
        principal_id: PrincipalId,
        building_id: BuildingId,
    ) -> Result<bool, AccessResolverError> {
        self.svc
            .evaluate_building(principal_id, building_id)
            .await
            .map_err(|e| log_and_convert("can_access_building", e))
    }

    async fn can_access_residence(
        &self,
        principal_id: PrincipalId,
        residence_id: ResidenceId,
    ) -> Result<bool, AccessResolverError> {
        self.svc
            .evaluate_residence(principal_id, residence_id)
            .await
            .map_err(|e| log_and_convert("can_access_residence", e))
    }

    async fn can_perform_write_operation(
        &self,
        principal_id: PrincipalId,
        action: Action,
    ) -> Result<bool, AccessResolverError> {
        self.svc
            .evaluate_write(principal_id, action)
            .await
            .map_err(|e| log_and_convert("can_perform_write_operation", e))
    }
}
