//! Connection wrapper that only runs scoped selects.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, Order};

use crate::secure::error::ScopeError;
use crate::secure::select::SecureEntityExt;
use crate::secure::{AccessScope, InheritsScope, ScopableEntity};

#[derive(Clone, Debug)]
pub struct SecureConn {
    conn: DatabaseConnection,
}

impl SecureConn {
    #[must_use]
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Raw connection, for migrations and unscoped lookups by primary key.
    #[must_use]
    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// All rows of `E` inside `scope`, ordered by `order_col`.
    ///
    /// # Errors
    /// Returns `ScopeError::Db` if the database query fails.
    pub async fn list<E>(
        &self,
        scope: &AccessScope,
        order_col: E::Column,
    ) -> Result<Vec<E::Model>, ScopeError>
    where
        E: ScopableEntity,
        E::Column: ColumnTrait + Copy,
    {
        E::find()
            .secure()
            .scope_with(scope)
            .order_by(order_col, Order::Asc)
            .all(&self.conn)
            .await
    }

    /// All rows of `E` inside `scope`, resolving organizations through the parent table.
    ///
    /// # Errors
    /// Returns `ScopeError::Db` if the database query fails.
    pub async fn list_through_parent<E>(
        &self,
        scope: &AccessScope,
        order_col: E::Column,
    ) -> Result<Vec<E::Model>, ScopeError>
    where
        E: InheritsScope,
        E::Column: ColumnTrait + Copy,
        <E::Parent as EntityTrait>::Column: ColumnTrait + Copy,
    {
        E::find()
            .secure()
            .scope_through_parent(scope)
            .order_by(order_col, Order::Asc)
            .all(&self.conn)
            .await
    }

    /// Whether the row `id` of `E` is inside `scope`.
    ///
    /// # Errors
    /// Returns `ScopeError::Invalid` if `E` has no resource column,
    /// `ScopeError::Db` if the query fails.
    pub async fn contains<E>(&self, scope: &AccessScope, id: uuid::Uuid) -> Result<bool, ScopeError>
    where
        E: ScopableEntity,
        E::Column: ColumnTrait + Copy,
        E::Model: sea_orm::FromQueryResult + Send + Sync,
    {
        let count = E::find()
            .secure()
            .scope_with(scope)
            .and_id(id)?
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }
}
