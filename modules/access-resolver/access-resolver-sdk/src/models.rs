//! Read models the resolver evaluates. The resolver never writes them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PrincipalId = Uuid;
pub type OrganizationId = Uuid;
pub type BuildingId = Uuid;
pub type ResidenceId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub is_active: bool,
    /// Members see every active organization.
    #[serde(default)]
    pub is_globally_privileged: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub organization_id: OrganizationId,
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Residence {
    pub id: ResidenceId,
    pub building_id: BuildingId,
    pub unit_number: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationMembership {
    pub principal_id: PrincipalId,
    pub organization_id: OrganizationId,
    pub is_active: bool,
    /// Grants the same visibility as membership in a globally-privileged organization.
    #[serde(default)]
    pub can_access_all_organizations: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidenceMembership {
    pub principal_id: PrincipalId,
    pub residence_id: ResidenceId,
    /// Free-form, e.g. `owner` or `tenant`.
    pub relationship_type: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn privileged_flag_defaults_to_false() {
        let json = format!(
            r#"{{"id":"{}","name":"Acme","is_active":true}}"#,
            Uuid::nil()
        );
        let org: Organization = serde_json::from_str(&json).unwrap();
        assert!(!org.is_globally_privileged);
    }

    #[test]
    fn residence_membership_dates_are_optional() {
        let json = format!(
            r#"{{"principal_id":"{0}","residence_id":"{0}","relationship_type":"tenant","start_date":"2024-01-01","end_date":null,"is_active":true}}"#,
            Uuid::nil()
        );
        let m: ResidenceMembership = serde_json::from_str(&json).unwrap();
        assert_eq!(m.start_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert!(m.end_date.is_none());
    }
}
