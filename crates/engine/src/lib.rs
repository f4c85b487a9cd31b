//! # Stowage Engine
//!
//! Heuristic, constraint-driven 3D container packing.
//!
//! The engine places a heterogeneous multiset of rectangular cargo units
//! into standard intermodal containers under warehouse-floor constraints:
//! forklift access paths with side-shift reach, stacking support
//! fractions, top-only (unstackable) items, door-opening fit, payload
//! caps, and overhead lift clearance.
//!
//! ## Components
//!
//! - [`geometry`]: axis-aligned overlap and support-area primitives
//! - [`grid`]: bucket index over placed items along the loading axis
//! - [`access`]: the forklift path predicate
//! - [`feasibility`]: the composed placement oracle
//! - [`candidates`]: anchor corners, orientations, and the floor slide
//! - [`scoring`]: composite lower-is-better candidate scoring
//! - [`packer`]: the single-container best-move loop
//! - [`planner`]: container selection strategies and the shipment surface
//!
//! ## Determinism
//!
//! Packing is deterministic in its inputs: no clocks, no randomness, and
//! stable iteration everywhere a tie could otherwise float. Re-running on
//! the same manifest reproduces placements bit for bit.

pub mod access;
pub mod candidates;
pub mod feasibility;
pub mod geometry;
pub mod grid;
pub mod packer;
pub mod planner;
pub mod scoring;

// Re-exports
pub use grid::SpatialGrid;
pub use packer::{ContainerOutcome, ContainerPacker};
pub use planner::ShipmentPlanner;
pub use stowage_core::{
    CargoSpec, CargoUnit, Config, ContainerSpec, ContainerType, Error, PackResult, Placement,
    ProgressCallback, ProgressInfo, Result, Shipment, Strategy,
};
