//! Access Resolver Module
//!
//! Decides which organizations, buildings, and residences a principal may
//! see or modify. The public API is defined in `access-resolver-sdk`.
//!
//! - [`domain::AccessResolver`] - point checks, per-request scopes, listing helpers
//! - [`domain::ResourceFilter`] - in-memory filtering of loaded collections
//! - [`infra::storage`] - `SeaORM` repository with query-level scoping, in-memory store
//! - [`api::rest`] - axum gate mapping decisions to problem responses
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub use access_resolver_sdk::{AccessResolverClient, AccessResolverError};

pub mod module;
pub use module::AccessResolverModule;

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
