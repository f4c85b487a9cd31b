//! # Stowage
//!
//! Container stowage planning for real warehouse floors.
//!
//! This umbrella crate re-exports the full public API: declare cargo with
//! [`CargoSpec`], pick a [`Strategy`], and let the [`ShipmentPlanner`]
//! compute forklift-executable placements across standard intermodal
//! containers.
//!
//! ```
//! use stowage::{CargoSpec, Config, ShipmentPlanner, Strategy};
//!
//! let cargo = vec![
//!     CargoSpec::new("pallet", "Euro pallet", 120.0, 80.0, 144.0, 350.0).with_quantity(8),
//!     CargoSpec::new("fridge", "Fridge", 70.0, 70.0, 180.0, 90.0)
//!         .with_quantity(2)
//!         .with_unstackable(true),
//! ];
//!
//! let planner = ShipmentPlanner::new(Config::new().with_strategy(Strategy::SmartMix));
//! let shipment = planner.plan(&cargo).unwrap();
//! assert!(shipment.placed_count() > 0);
//! ```

pub use stowage_core::{
    expand_units, CargoId, CargoSpec, CargoUnit, Config, ContainerSpec, ContainerType, Error,
    PackResult, Placement, ProgressCallback, ProgressInfo, Result, Shipment, ShipmentSummary,
    Strategy,
};
pub use stowage_engine::{ContainerOutcome, ContainerPacker, ShipmentPlanner};
pub use stowage_manifest::parse_manifest;

/// Engine constants (distances in centimetres, masses in kilograms).
pub use stowage_core::constants;
