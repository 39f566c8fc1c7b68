//! Scope-enforcing query layer.
//!
//! Every read goes through [`SecureSelect`], which cannot execute until an
//! [`AccessScope`] has been applied. An empty scope compiles to `WHERE false`.
//!
//! ```rust,ignore
//! let scope = AccessScope::organizations_only(org_ids);
//! let rows = building::Entity::find()
//!     .secure()
//!     .scope_with(&scope)
//!     .all(conn)
//!     .await?;
//! ```

mod cond;
mod entity_traits;
mod error;
mod secure_conn;
mod select;

pub use koveo_security::AccessScope;

pub use cond::{build_inherited_scope_condition, build_scope_condition};
pub use entity_traits::{InheritsScope, ScopableEntity};
pub use error::ScopeError;
pub use secure_conn::SecureConn;
pub use select::{Scoped, SecureEntityExt, SecureSelect, Unscoped};
