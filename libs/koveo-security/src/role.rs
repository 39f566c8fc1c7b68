//! Role capability table.
//!
//! Static mapping from [`Role`] to a numeric rank and to the set of
//! [`Action`]s the role may perform in general, independent of where the
//! target sits in the organization hierarchy.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Role assigned to a principal.
///
/// Demo variants mirror the visibility of the role they shadow but carry
/// read-only capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Resident,
    Tenant,
    DemoManager,
    DemoResident,
    DemoTenant,
}

/// Action a principal attempts on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    /// Attach or detach principals to organizations and residences.
    Assign,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown action: {0}")]
pub struct UnknownAction(pub String);

const ALL_ACTIONS: &[Action] = &[
    Action::Read,
    Action::Create,
    Action::Update,
    Action::Delete,
    Action::Assign,
];
const MANAGER_ACTIONS: &[Action] = &[Action::Read, Action::Create, Action::Update, Action::Delete];
const RESIDENT_ACTIONS: &[Action] = &[Action::Read, Action::Create, Action::Update];
const TENANT_ACTIONS: &[Action] = &[Action::Read, Action::Create];
const DEMO_ACTIONS: &[Action] = &[Action::Read];

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Admin,
        Role::Manager,
        Role::Resident,
        Role::Tenant,
        Role::DemoManager,
        Role::DemoResident,
        Role::DemoTenant,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Resident => "resident",
            Role::Tenant => "tenant",
            Role::DemoManager => "demo_manager",
            Role::DemoResident => "demo_resident",
            Role::DemoTenant => "demo_tenant",
        }
    }

    /// Numeric rank, higher is more privileged. Demo roles share the rank of
    /// the role they mirror.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self.visibility_role() {
            Role::Admin => 4,
            Role::Manager => 3,
            Role::Resident => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn is_demo(self) -> bool {
        matches!(
            self,
            Role::DemoManager | Role::DemoResident | Role::DemoTenant
        )
    }

    /// The non-demo role whose visibility rules this role follows.
    #[must_use]
    pub fn visibility_role(self) -> Role {
        match self {
            Role::DemoManager => Role::Manager,
            Role::DemoResident => Role::Resident,
            Role::DemoTenant => Role::Tenant,
            other => other,
        }
    }

    /// Privileged roles reach residences through organization scope; the
    /// others only through their own residence memberships.
    #[must_use]
    pub fn is_privileged(self) -> bool {
        matches!(self.visibility_role(), Role::Admin | Role::Manager)
    }

    /// Actions this role may perform in general.
    #[must_use]
    pub fn capabilities(self) -> &'static [Action] {
        match self {
            Role::Admin => ALL_ACTIONS,
            Role::Manager => MANAGER_ACTIONS,
            Role::Resident => RESIDENT_ACTIONS,
            Role::Tenant => TENANT_ACTIONS,
            Role::DemoManager | Role::DemoResident | Role::DemoTenant => DEMO_ACTIONS,
        }
    }

    #[must_use]
    pub fn permits(self, action: Action) -> bool {
        self.capabilities().contains(&action)
    }

    #[must_use]
    pub fn outranks(self, other: Role) -> bool {
        self.rank() > other.rank()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_owned()))
    }
}

impl Action {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Assign => "assign",
        }
    }

    #[must_use]
    pub fn is_write(self) -> bool {
        !matches!(self, Action::Read)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_ACTIONS
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_owned()))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn demo_roles_mirror_rank() {
        assert_eq!(Role::DemoManager.rank(), Role::Manager.rank());
        assert_eq!(Role::DemoResident.rank(), Role::Resident.rank());
        assert_eq!(Role::DemoTenant.rank(), Role::Tenant.rank());
        assert!(Role::Admin.outranks(Role::Manager));
        assert!(Role::Manager.outranks(Role::Resident));
        assert!(Role::Resident.outranks(Role::Tenant));
    }

    #[test]
    fn privileged_set() {
        assert!(Role::Admin.is_privileged());
        assert!(Role::Manager.is_privileged());
        assert!(Role::DemoManager.is_privileged());
        assert!(!Role::Resident.is_privileged());
        assert!(!Role::Tenant.is_privileged());
        assert!(!Role::DemoResident.is_privileged());
        assert!(!Role::DemoTenant.is_privileged());
    }

    #[test]
    fn demo_roles_are_read_only() {
        for role in Role::ALL.into_iter().filter(|r| r.is_demo()) {
            assert!(role.permits(Action::Read), "{role} should read");
            for action in ALL_ACTIONS.iter().copied().filter(|a| a.is_write()) {
                assert!(!role.permits(action), "{role} must not {action}");
            }
        }
    }

    #[test]
    fn capability_table() {
        assert!(Role::Admin.permits(Action::Assign));
        assert!(!Role::Manager.permits(Action::Assign));
        assert!(Role::Manager.permits(Action::Delete));
        assert!(!Role::Resident.permits(Action::Delete));
        assert!(Role::Resident.permits(Action::Update));
        assert!(!Role::Tenant.permits(Action::Update));
        assert!(Role::Tenant.permits(Action::Create));
    }

    #[test]
    fn parse_roles_and_actions() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert_eq!(
            "owner".parse::<Role>(),
            Err(UnknownRole("owner".to_owned()))
        );
        assert_eq!("delete".parse::<Action>(), Ok(Action::Delete));
        assert!("purge".parse::<Action>().is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Role::DemoManager).unwrap();
        assert_eq!(json, "\"demo_manager\"");
        let role: Role = serde_json::from_str("\"demo_tenant\"").unwrap();
        assert_eq!(role, Role::DemoTenant);
    }
}
