use crate::{Action, Principal, ResourceKind};

/// Type alias for a reference-counted Policy Engine
pub type PolicyEngineRef = std::sync::Arc<dyn PolicyEngine>;

/// Granular action/resource permission matrix consulted after the
/// hierarchy checks have passed.
pub trait PolicyEngine: Send + Sync {
    fn allows(&self, principal: &Principal, resource: ResourceKind, action: Action) -> bool;
}

/// Policy backed by the static role capability table.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoleCapabilityPolicy;

impl PolicyEngine for RoleCapabilityPolicy {
    fn allows(&self, principal: &Principal, _resource: ResourceKind, action: Action) -> bool {
        principal.is_active() && principal.role().permits(action)
    }
}
