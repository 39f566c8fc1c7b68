//! Configuration for the access resolver module.

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use koveo_security::constants::{
    DEMO_ORGANIZATION_NAME, LEGACY_PRIVILEGED_ORGANIZATION_NAME, READ_ONLY_ORGANIZATION_NAME,
};
use serde::{Deserialize, Serialize};

/// Figment key the module section lives under.
pub const CONFIG_KEY: &str = "access_resolver";

/// Environment prefix; nested keys are separated by `__`,
/// e.g. `KOVEO_ACCESS_RESOLVER__ENFORCE_READ_ONLY_COHORT=false`.
pub const ENV_PREFIX: &str = "KOVEO_";

/// Module configuration.
///
/// ```yaml
/// access_resolver:
///   demo_organization_name: Demo
///   legacy_privileged_name: null   # disable the name shim
///   read_only_organization_name: Open Demo
///   enforce_read_only_cohort: true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessResolverConfig {
    /// Organization visible to every known principal, matched by exact name.
    pub demo_organization_name: String,

    /// Name that grants global visibility for data predating the
    /// `is_globally_privileged` flag. `None` turns the shim off.
    pub legacy_privileged_name: Option<String>,

    /// Members of this organization are blocked from every write.
    pub read_only_organization_name: String,

    pub enforce_read_only_cohort: bool,
}

impl Default for AccessResolverConfig {
    fn default() -> Self {
        Self {
            demo_organization_name: DEMO_ORGANIZATION_NAME.to_owned(),
            legacy_privileged_name: Some(LEGACY_PRIVILEGED_ORGANIZATION_NAME.to_owned()),
            read_only_organization_name: READ_ONLY_ORGANIZATION_NAME.to_owned(),
            enforce_read_only_cohort: true,
        }
    }
}

impl AccessResolverConfig {
    /// Extract the module section; absent keys fall back to defaults.
    ///
    /// # Errors
    /// Returns the figment error when the section is malformed.
    pub fn from_figment(figment: &Figment) -> Result<Self, figment::Error> {
        if !figment.contains(CONFIG_KEY) {
            return Ok(Self::default());
        }
        figment.extract_inner(CONFIG_KEY)
    }

    #[must_use]
    pub fn is_legacy_privileged_name(&self, name: &str) -> bool {
        self.legacy_privileged_name
            .as_deref()
            .is_some_and(|legacy| legacy.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn is_read_only_organization(&self, name: &str) -> bool {
        self.enforce_read_only_cohort && self.read_only_organization_name.eq_ignore_ascii_case(name)
    }
}

/// Layered configuration sources: optional YAML file, then `KOVEO_*` environment.
#[must_use]
pub fn figment(path: Option<&Path>) -> Figment {
    let base = Figment::new();
    let base = match path {
        Some(p) => base.merge(Yaml::file(p)),
        None => base,
    };
    base.merge(Env::prefixed(ENV_PREFIX).split("__"))
}
