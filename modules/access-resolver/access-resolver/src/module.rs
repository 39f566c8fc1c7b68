//! Wiring: configuration, storage, resolver, client, and gate.

use std::sync::Arc;

use access_resolver_sdk::AccessResolverClient;
use anyhow::Context;
use figment::Figment;
use koveo_db::DbConfig;
use koveo_db::secure::SecureConn;
use koveo_security::{PolicyEngineRef, RoleCapabilityPolicy};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::api::rest::AccessGate;
use crate::config::AccessResolverConfig;
use crate::domain::{AccessRepository, AccessResolver, AccessResolverLocalClient};
use crate::infra::storage::{Migrator, SeaOrmAccessRepository};

/// Fully wired access resolver.
#[derive(Clone)]
pub struct AccessResolverModule {
    resolver: Arc<AccessResolver>,
    client: Arc<dyn AccessResolverClient>,
    gate: AccessGate,
}

impl AccessResolverModule {
    /// Wire the module over an existing read store.
    #[must_use]
    pub fn new(
        repo: Arc<dyn AccessRepository>,
        config: AccessResolverConfig,
        policy: PolicyEngineRef,
    ) -> Self {
        let resolver = Arc::new(AccessResolver::new(repo, config));
        let client: Arc<dyn AccessResolverClient> =
            Arc::new(AccessResolverLocalClient::new(Arc::clone(&resolver)));
        let gate = AccessGate::new(Arc::clone(&client), policy);
        Self {
            resolver,
            client,
            gate,
        }
    }

    /// Connect to the configured database, apply migrations, and wire the
    /// module with the role capability policy.
    ///
    /// # Errors
    /// Fails on invalid configuration, unreachable database, or a failed migration.
    pub async fn init(figment: &Figment) -> anyhow::Result<Self> {
        let config = AccessResolverConfig::from_figment(figment)
            .context("invalid access_resolver configuration")?;
        let db_config = DbConfig::from_figment(figment)?;

        let conn = koveo_db::connect(&db_config).await?;
        Migrator::up(&conn, None)
            .await
            .context("access-resolver migrations failed")?;

        info!(
            backend = db_config.backend(),
            demo_organization = %config.demo_organization_name,
            legacy_shim = config.legacy_privileged_name.is_some(),
            read_only_cohort = config.enforce_read_only_cohort,
            "access-resolver initialized"
        );

        let repo = Arc::new(SeaOrmAccessRepository::new(SecureConn::new(conn)));
        Ok(Self::new(repo, config, Arc::new(RoleCapabilityPolicy)))
    }

    #[must_use]
    pub fn resolver(&self) -> &Arc<AccessResolver> {
        &self.resolver
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn AccessResolverClient> {
        Arc::clone(&self.client)
    }

    #[must_use]
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }
}
