//! # Stowage Core
//!
//! Shared data model for the stowage container loading engine.
//!
//! This crate defines the cargo, container, placement and result types
//! that the packing engine and its satellite crates exchange, plus the
//! strategy/configuration surface and the progress callback contract.
//!
//! ## Coordinate system
//!
//! Origin at the rear-inner-floor corner of the container. `x` grows
//! toward the door (loading direction), `y` is vertical, `z` is lateral.
//! All distances are centimetres, all masses kilograms.
//!
//! ## Feature flags
//!
//! - `serde`: enable serialization/deserialization support.

pub mod cargo;
pub mod constants;
pub mod container;
pub mod error;
pub mod placement;
pub mod result;
pub mod solver;

// Re-exports
pub use cargo::{expand_units, CargoId, CargoSpec, CargoUnit};
pub use container::{ContainerSpec, ContainerType};
pub use error::{Error, Result};
pub use placement::Placement;
pub use result::{PackResult, Shipment, ShipmentSummary};
pub use solver::{Config, ProgressCallback, ProgressInfo, Strategy};
