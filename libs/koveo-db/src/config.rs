//! Connection settings.

use std::time::Duration;

use figment::Figment;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use serde::{Deserialize, Serialize};

/// Figment key the database section lives under.
pub const DB_CONFIG_KEY: &str = "database";

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("invalid database configuration: {0}")]
    Config(#[source] Box<figment::Error>),

    #[error("failed to connect: {0}")]
    Connect(#[from] DbErr),
}

/// Database section of the service configuration.
///
/// ```yaml
/// database:
///   dsn: "postgres://koveo@localhost/koveo"
///   max_connections: 20
///   connect_timeout: 5s
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DbConfig {
    pub dsn: String,
    pub max_connections: u32,
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// Echo every statement through sqlx's logger.
    pub sqlx_logging: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            dsn: "sqlite::memory:".to_owned(),
            max_connections: 10,
            connect_timeout: Duration::from_secs(5),
            sqlx_logging: false,
        }
    }
}

impl DbConfig {
    /// Extract the `database` section; absent keys fall back to defaults.
    ///
    /// # Errors
    /// Returns [`DbError::Config`] when the section is malformed.
    pub fn from_figment(figment: &Figment) -> Result<Self, DbError> {
        if !figment.contains(DB_CONFIG_KEY) {
            return Ok(Self::default());
        }
        figment
            .extract_inner(DB_CONFIG_KEY)
            .map_err(|e| DbError::Config(Box::new(e)))
    }

    /// An in-memory SQLite database only exists inside one connection.
    fn is_in_memory(&self) -> bool {
        self.dsn.starts_with("sqlite::memory:") || self.dsn.contains("mode=memory")
    }

    /// Scheme part of the DSN, safe to log.
    #[must_use]
    pub fn backend(&self) -> &str {
        self.dsn.split(':').next().unwrap_or_default()
    }
}

/// Open a pooled connection.
///
/// # Errors
/// Returns [`DbError::Connect`] when the database is unreachable.
pub async fn connect(cfg: &DbConfig) -> Result<DatabaseConnection, DbError> {
    let max_connections = if cfg.is_in_memory() {
        1
    } else {
        cfg.max_connections.max(1)
    };

    let mut opts = ConnectOptions::new(cfg.dsn.clone());
    opts.max_connections(max_connections)
        .connect_timeout(cfg.connect_timeout)
        .sqlx_logging(cfg.sqlx_logging);

    tracing::info!(
        backend = cfg.backend(),
        max_connections,
        "connecting to database"
    );
    let conn = Database::connect(opts).await?;
    Ok(conn)
}
