/// Organization visible to every principal regardless of membership.
pub const DEMO_ORGANIZATION_NAME: &str = "Demo";

/// Historical name of the globally-privileged organization.
///
/// Only consulted by the legacy name shim; new data carries the
/// `is_globally_privileged` flag instead.
pub const LEGACY_PRIVILEGED_ORGANIZATION_NAME: &str = "Koveo";

/// Organization whose members are blocked from every write.
pub const READ_ONLY_ORGANIZATION_NAME: &str = "Open Demo";
