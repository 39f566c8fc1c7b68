use std::marker::PhantomData;

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    sea_query::Expr,
};

use crate::secure::cond::{build_inherited_scope_condition, build_scope_condition};
use crate::secure::error::ScopeError;
use crate::secure::{AccessScope, InheritsScope, ScopableEntity};

/// Typestate marker: no scope applied, cannot execute.
#[derive(Debug, Clone, Copy)]
pub struct Unscoped;

/// Typestate marker: scope applied, may execute.
#[derive(Debug, Clone, Copy)]
pub struct Scoped;

/// A `Select` that only exposes execution once it has been scoped.
#[must_use]
#[derive(Clone, Debug)]
pub struct SecureSelect<E: EntityTrait, S> {
    pub(crate) inner: sea_orm::Select<E>,
    pub(crate) _state: PhantomData<S>,
}

pub trait SecureEntityExt<E: EntityTrait>: Sized {
    /// Wrap the select; call `scope_with` or `scope_through_parent` before executing.
    fn secure(self) -> SecureSelect<E, Unscoped>;
}

impl<E> SecureEntityExt<E> for sea_orm::Select<E>
where
    E: EntityTrait,
{
    fn secure(self) -> SecureSelect<E, Unscoped> {
        SecureSelect {
            inner: self,
            _state: PhantomData,
        }
    }
}

impl<E> SecureSelect<E, Unscoped>
where
    E: EntityTrait,
{
    pub fn scope_with(self, scope: &AccessScope) -> SecureSelect<E, Scoped>
    where
        E: ScopableEntity,
        E::Column: ColumnTrait + Copy,
    {
        let cond = build_scope_condition::<E>(scope);
        SecureSelect {
            inner: self.inner.filter(cond),
            _state: PhantomData,
        }
    }

    /// Scope an entity whose organization is stored on its parent row.
    pub fn scope_through_parent(self, scope: &AccessScope) -> SecureSelect<E, Scoped>
    where
        E: InheritsScope,
        E::Column: ColumnTrait + Copy,
        <E::Parent as EntityTrait>::Column: ColumnTrait + Copy,
    {
        let cond = build_inherited_scope_condition::<E>(scope);
        SecureSelect {
            inner: self.inner.filter(cond),
            _state: PhantomData,
        }
    }
}

impl<E> SecureSelect<E, Scoped>
where
    E: EntityTrait,
{
    /// # Errors
    /// Returns `ScopeError::Db` if the database query fails.
    pub async fn all<C>(self, conn: &C) -> Result<Vec<E::Model>, ScopeError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        Ok(self.inner.all(conn).await?)
    }

    /// # Errors
    /// Returns `ScopeError::Db` if the database query fails.
    pub async fn count<C>(self, conn: &C) -> Result<u64, ScopeError>
    where
        C: ConnectionTrait + Send + Sync,
        E::Model: sea_orm::FromQueryResult + Send + Sync,
    {
        Ok(self.inner.count(conn).await?)
    }

    /// Narrow to a single row by its primary id.
    ///
    /// # Errors
    /// Returns `ScopeError::Invalid` if the entity has no resource column.
    pub fn and_id(self, id: uuid::Uuid) -> Result<Self, ScopeError>
    where
        E: ScopableEntity,
        E::Column: ColumnTrait + Copy,
    {
        let col = E::resource_col().ok_or(ScopeError::Invalid(
            "entity must have a resource_col to use and_id()",
        ))?;
        Ok(self.filter(sea_orm::Condition::all().add(Expr::col(col).eq(id))))
    }

    /// Extra filters are AND-ed with the scope.
    pub fn filter(mut self, filter: sea_orm::Condition) -> Self {
        self.inner = QueryFilter::filter(self.inner, filter);
        self
    }

    pub fn order_by<C>(mut self, col: C, order: sea_orm::Order) -> Self
    where
        C: sea_orm::IntoSimpleExpr,
    {
        self.inner = QueryOrder::order_by(self.inner, col, order);
        self
    }
}
