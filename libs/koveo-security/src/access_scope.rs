use uuid::Uuid;

/// Access scope defining which organizations and resources a request can reach.
///
/// An empty scope (no organizations, no resources) is a "deny all" scope.
/// To reach data, the scope must contain at least one organization ID or resource ID.
///
/// Both lists are kept sorted and deduplicated so two scopes built from the
/// same ids compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct AccessScope {
    pub(crate) organization_ids: Vec<Uuid>,
    pub(crate) resource_ids: Vec<Uuid>,
}

fn canonical(mut ids: Vec<Uuid>) -> Vec<Uuid> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

impl AccessScope {
    #[inline]
    #[must_use]
    pub fn organization_ids(&self) -> &[Uuid] {
        &self.organization_ids
    }

    #[inline]
    #[must_use]
    pub fn resource_ids(&self) -> &[Uuid] {
        &self.resource_ids
    }

    /// Returns true if this scope is empty (no organizations, no resources).
    /// An empty scope results in a "deny all" condition in queries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.organization_ids.is_empty() && self.resource_ids.is_empty()
    }

    #[must_use]
    pub fn has_organizations(&self) -> bool {
        !self.organization_ids.is_empty()
    }

    #[must_use]
    pub fn has_resources(&self) -> bool {
        !self.resource_ids.is_empty()
    }

    #[must_use]
    pub fn contains_organization(&self, id: Uuid) -> bool {
        self.organization_ids.binary_search(&id).is_ok()
    }

    #[must_use]
    pub fn contains_resource(&self, id: Uuid) -> bool {
        self.resource_ids.binary_search(&id).is_ok()
    }

    /// Scope that matches nothing.
    #[must_use]
    pub fn deny_all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn organizations_only(organization_ids: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            organization_ids: canonical(organization_ids.into_iter().collect()),
            resource_ids: vec![],
        }
    }

    #[must_use]
    pub fn resources_only(resource_ids: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            organization_ids: vec![],
            resource_ids: canonical(resource_ids.into_iter().collect()),
        }
    }

    #[must_use]
    pub fn organization(organization_id: Uuid) -> Self {
        Self::organizations_only([organization_id])
    }

    #[must_use]
    pub fn resource(resource_id: Uuid) -> Self {
        Self::resources_only([resource_id])
    }

    /// Create a scope with both organization and resource constraints (AND).
    #[must_use]
    pub fn both(
        organization_ids: impl IntoIterator<Item = Uuid>,
        resource_ids: impl IntoIterator<Item = Uuid>,
    ) -> Self {
        Self {
            organization_ids: canonical(organization_ids.into_iter().collect()),
            resource_ids: canonical(resource_ids.into_iter().collect()),
        }
    }
}
