use std::collections::HashMap;

use access_resolver_sdk::{
    Building, BuildingId, Organization, OrganizationId, OrganizationMembership, PrincipalId,
    Residence, ResidenceId,
};
use async_trait::async_trait;
use koveo_db::secure::{ScopeError, SecureConn};
use koveo_security::{AccessScope, Principal};
use sea_orm::{ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use super::entity::{
    building, organization, organization_membership, principal, residence, residence_membership,
};
use crate::domain::{AccessRepository, StoreError};

impl From<DbErr> for StoreError {
    fn from(e: DbErr) -> Self {
        StoreError::Backend(Box::new(e))
    }
}

impl From<ScopeError> for StoreError {
    fn from(e: ScopeError) -> Self {
        StoreError::Backend(Box::new(e))
    }
}

/// Relational read store.
///
/// Listing methods go through [`SecureConn`], so rows outside the
/// [`AccessScope`] never leave the database.
pub struct SeaOrmAccessRepository {
    db: SecureConn,
}

impl SeaOrmAccessRepository {
    #[must_use]
    pub fn new(db: SecureConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccessRepository for SeaOrmAccessRepository {
    async fn find_principal(&self, id: PrincipalId) -> Result<Option<Principal>, StoreError> {
        principal::Entity::find_by_id(id)
            .one(self.db.conn())
            .await?
            .map(Principal::try_from)
            .transpose()
    }

    async fn active_organization_memberships(
        &self,
        principal_id: PrincipalId,
    ) -> Result<Vec<OrganizationMembership>, StoreError> {
        let rows = organization_membership::Entity::find()
            .filter(organization_membership::Column::PrincipalId.eq(principal_id))
            .filter(organization_membership::Column::IsActive.eq(true))
            .all(self.db.conn())
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_organizations(
        &self,
        ids: &[OrganizationId],
    ) -> Result<Vec<Organization>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = organization::Entity::find()
            .filter(organization::Column::Id.is_in(ids.iter().copied()))
            .all(self.db.conn())
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_organization_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Organization>, StoreError> {
        let row = organization::Entity::find()
            .filter(organization::Column::Name.eq(name))
            .order_by_asc(organization::Column::Id)
            .one(self.db.conn())
            .await?;
        Ok(row.map(Into::into))
    }

    async fn active_organization_ids(&self) -> Result<Vec<OrganizationId>, StoreError> {
        let ids = organization::Entity::find()
            .select_only()
            .column(organization::Column::Id)
            .filter(organization::Column::IsActive.eq(true))
            .into_tuple::<OrganizationId>()
            .all(self.db.conn())
            .await?;
        Ok(ids)
    }

    async fn find_building(&self, id: BuildingId) -> Result<Option<Building>, StoreError> {
        let row = building::Entity::find_by_id(id)
            .one(self.db.conn())
            .await?;
        Ok(row.map(Into::into))
    }

    async fn find_residence(&self, id: ResidenceId) -> Result<Option<Residence>, StoreError> {
        let row = residence::Entity::find_by_id(id)
            .one(self.db.conn())
            .await?;
        Ok(row.map(Into::into))
    }

    async fn building_organizations(
        &self,
        building_ids: &[BuildingId],
    ) -> Result<HashMap<BuildingId, OrganizationId>, StoreError> {
        if building_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let pairs = building::Entity::find()
            .select_only()
            .column(building::Column::Id)
            .column(building::Column::OrganizationId)
            .filter(building::Column::Id.is_in(building_ids.iter().copied()))
            .into_tuple::<(BuildingId, OrganizationId)>()
            .all(self.db.conn())
            .await?;
        Ok(pairs.into_iter().collect())
    }

    async fn active_residence_ids(
        &self,
        principal_id: PrincipalId,
    ) -> Result<Vec<ResidenceId>, StoreError> {
        let ids = residence_membership::Entity::find()
            .select_only()
            .column(residence_membership::Column::ResidenceId)
            .filter(residence_membership::Column::PrincipalId.eq(principal_id))
            .filter(residence_membership::Column::IsActive.eq(true))
            .into_tuple::<ResidenceId>()
            .all(self.db.conn())
            .await?;
        Ok(ids)
    }

    async fn list_organizations(
        &self,
        scope: &AccessScope,
    ) -> Result<Vec<Organization>, StoreError> {
        let rows = self
            .db
            .list::<organization::Entity>(scope, organization::Column::Name)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_buildings(&self, scope: &AccessScope) -> Result<Vec<Building>, StoreError> {
        let rows = self
            .db
            .list::<building::Entity>(scope, building::Column::Name)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_residences(&self, scope: &AccessScope) -> Result<Vec<Residence>, StoreError> {
        let rows = self
            .db
            .list_through_parent::<residence::Entity>(scope, residence::Column::UnitNumber)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
