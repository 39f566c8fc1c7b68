use koveo_db::secure::InheritsScope;
use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "residences")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub building_id: Uuid,
    pub unit_number: String,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Residences reach their organization through the owning building.
impl InheritsScope for Entity {
    type Parent = super::building::Entity;

    fn parent_col() -> Self::Column {
        Column::BuildingId
    }
    fn resource_col() -> Option<Self::Column> {
        Some(Column::Id)
    }
}
