use koveo_db::secure::ScopableEntity;
use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "organizations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub is_globally_privileged: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// An organization is its own scope.
impl ScopableEntity for Entity {
    fn organization_col() -> Option<Self::Column> {
        Some(Column::Id)
    }
    fn resource_col() -> Option<Self::Column> {
        Some(Column::Id)
    }
}
