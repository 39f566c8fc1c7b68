//! Database plumbing for Koveo services.
//!
//! - [`DbConfig`] / [`connect`]: connection settings loaded through figment
//! - [`secure`]: `SeaORM` queries that cannot run without an [`AccessScope`]
//!
//! [`AccessScope`]: koveo_security::AccessScope
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod secure;

pub use config::{DbConfig, DbError, connect};
