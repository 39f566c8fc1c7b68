//! HTTP adapter: turns resolver decisions into proceed / problem responses.

pub mod error;
pub mod gate;
pub mod ids;

pub use error::GateRejection;
pub use gate::{AccessGate, GateGuard, Requirement, enforce};
pub use ids::RequestIds;
