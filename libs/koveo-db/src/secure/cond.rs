use sea_orm::sea_query::{Expr, Query};
use sea_orm::{ColumnTrait, Condition, EntityTrait};

use crate::secure::{AccessScope, InheritsScope, ScopableEntity};

fn deny_all() -> Condition {
    Condition::all().add(Expr::value(false))
}

fn combine(parts: Vec<Condition>) -> Condition {
    match parts.len() {
        0 => deny_all(),
        1 => parts.into_iter().next().unwrap_or_else(deny_all),
        _ => parts
            .into_iter()
            .fold(Condition::all(), |acc, part| acc.add(part)),
    }
}

/// Builds the `WHERE` fragment for a directly scoped entity.
///
/// 1. Empty scope: `false`
/// 2. Organizations: `organization_col IN (...)`
/// 3. Resources: `resource_col IN (...)`
/// 4. Both: the two filters AND-ed
///
/// A dimension the entity does not expose denies all.
#[must_use]
pub fn build_scope_condition<E>(scope: &AccessScope) -> Condition
where
    E: ScopableEntity,
    E::Column: ColumnTrait + Copy,
{
    if scope.is_empty() {
        return deny_all();
    }

    let mut parts = Vec::with_capacity(2);

    if scope.has_organizations() {
        let Some(col) = E::organization_col() else {
            return deny_all();
        };
        parts.push(Condition::all().add(Expr::col(col).is_in(scope.organization_ids().to_vec())));
    }

    if scope.has_resources() {
        let Some(col) = E::resource_col() else {
            return deny_all();
        };
        parts.push(Condition::all().add(Expr::col(col).is_in(scope.resource_ids().to_vec())));
    }

    combine(parts)
}

/// Builds the `WHERE` fragment for an entity scoped through its parent.
///
/// Organization ids are matched against the parent table in a sub-select;
/// resource ids are matched against the entity's own id column.
#[must_use]
pub fn build_inherited_scope_condition<E>(scope: &AccessScope) -> Condition
where
    E: InheritsScope,
    E::Column: ColumnTrait + Copy,
    <E::Parent as EntityTrait>::Column: ColumnTrait + Copy,
{
    if scope.is_empty() {
        return deny_all();
    }

    let mut parts = Vec::with_capacity(2);

    if scope.has_organizations() {
        let (Some(parent_id), Some(parent_org)) = (
            <E::Parent as ScopableEntity>::resource_col(),
            <E::Parent as ScopableEntity>::organization_col(),
        ) else {
            return deny_all();
        };
        let parent = <E::Parent as Default>::default();
        let parents_in_scope = Query::select()
            .column((parent, parent_id))
            .from(parent)
            .and_where(Expr::col((parent, parent_org)).is_in(scope.organization_ids().to_vec()))
            .to_owned();
        parts.push(Condition::all().add(Expr::col(E::parent_col()).in_subquery(parents_in_scope)));
    }

    if scope.has_resources() {
        let Some(col) = <E as InheritsScope>::resource_col() else {
            return deny_all();
        };
        parts.push(Condition::all().add(Expr::col(col).is_in(scope.resource_ids().to_vec())));
    }

    combine(parts)
}
