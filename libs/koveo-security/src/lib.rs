#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod access_scope;
pub mod constants;
pub mod policy_engine;
pub mod principal;
pub mod resource;
pub mod role;

pub use access_scope::AccessScope;
pub use policy_engine::{PolicyEngine, PolicyEngineRef, RoleCapabilityPolicy};
pub use principal::Principal;
pub use resource::ResourceKind;
pub use role::{Action, Role, UnknownAction, UnknownRole};
