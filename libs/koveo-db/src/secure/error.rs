/// Errors that can occur during scoped query execution.
#[derive(thiserror::Error, Debug)]
pub enum ScopeError {
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    /// Entity cannot be filtered the way the caller asked.
    #[error("invalid scope: {0}")]
    Invalid(&'static str),
}
