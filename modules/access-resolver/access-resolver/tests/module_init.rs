#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Module wiring from layered configuration.

use access_resolver::AccessResolverModule;
use figment::Figment;
use figment::providers::{Format, Yaml};
use koveo_security::Action;
use uuid::Uuid;

const CONFIG: &str = r#"
database:
  dsn: "sqlite::memory:"
  connect_timeout: 2s
access_resolver:
  demo_organization_name: Showcase
  legacy_privileged_name: null
"#;

#[tokio::test]
async fn init_connects_migrates_and_applies_config() {
    let module = AccessResolverModule::init(&Figment::from(Yaml::string(CONFIG)))
        .await
        .unwrap();

    let config = module.resolver().config();
    assert_eq!(config.demo_organization_name, "Showcase");
    assert!(config.legacy_privileged_name.is_none());
    assert!(config.enforce_read_only_cohort);

    let client = module.client();
    let stranger = Uuid::new_v4();
    assert!(client.accessible_organizations(stranger).await.unwrap().is_empty());
    assert!(!client.can_access_building(stranger, Uuid::new_v4()).await.unwrap());
    assert!(
        !client
            .can_perform_write_operation(stranger, Action::Create)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn init_with_empty_configuration_uses_defaults() {
    let module = AccessResolverModule::init(&Figment::new()).await.unwrap();
    assert_eq!(module.resolver().config().demo_organization_name, "Demo");
}

#[tokio::test]
async fn init_rejects_unknown_keys() {
    let figment = Figment::from(Yaml::string("access_resolver:\n  koveo_mode: on\n"));
    assert!(AccessResolverModule::init(&figment).await.is_err());

    let figment = Figment::from(Yaml::string("database:\n  pool: 3\n"));
    assert!(AccessResolverModule::init(&figment).await.is_err());
}
