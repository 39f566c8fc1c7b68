use sea_orm::EntityTrait;

/// Columns an entity exposes to the scope layer.
///
/// Both dimensions are declared explicitly; `None` means the entity cannot
/// be filtered on that dimension and any scope asking for it denies all.
///
/// ```rust,ignore
/// impl ScopableEntity for building::Entity {
///     fn organization_col() -> Option<Self::Column> {
///         Some(building::Column::OrganizationId)
///     }
///     fn resource_col() -> Option<Self::Column> {
///         Some(building::Column::Id)
///     }
/// }
/// ```
pub trait ScopableEntity: EntityTrait {
    /// Column holding the owning organization id.
    fn organization_col() -> Option<Self::Column>;

    /// Column holding the row's own id.
    fn resource_col() -> Option<Self::Column>;
}

/// Entity whose organization is reached through a parent row.
///
/// Residences do not store an organization id; they belong to a building,
/// which does. Organization scoping becomes
/// `parent_col IN (SELECT parent.id FROM parent WHERE parent.organization_id IN (...))`.
pub trait InheritsScope: EntityTrait {
    type Parent: ScopableEntity;

    /// Foreign key pointing at `Parent::resource_col()`.
    fn parent_col() -> Self::Column;

    /// Column holding the row's own id.
    fn resource_col() -> Option<Self::Column>;
}
