pub mod building;
pub mod organization;
pub mod organization_membership;
pub mod principal;
pub mod residence;
pub mod residence_membership;
