use uuid::Uuid;

use crate::role::Role;

/// Authenticated actor whose access is being evaluated.
///
/// Supplied by the upstream authentication layer; the resolver re-reads the
/// stored principal by id before trusting role or active flag.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Principal {
    pub(crate) id: Uuid,
    pub(crate) role: Role,
    pub(crate) is_active: bool,
}

impl Principal {
    #[must_use]
    pub fn new(id: Uuid, role: Role) -> Self {
        Self {
            id,
            role,
            is_active: true,
        }
    }

    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    #[must_use]
    pub fn is_privileged(&self) -> bool {
        self.role.is_privileged()
    }
}
