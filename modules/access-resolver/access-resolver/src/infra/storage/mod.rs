//! Read-store implementations of [`crate::domain::AccessRepository`].

pub mod entity;
pub mod mapper;
pub mod memory;
pub mod migrations;
pub mod sea_orm_repo;

pub use memory::InMemoryAccessStore;
pub use migrations::Migrator;
pub use sea_orm_repo::SeaOrmAccessRepository;
