//! Engine constants.
//!
//! All distances are centimetres, all masses kilograms.

/// Clearance kept from the container walls and ceiling while loading.
pub const OPERATION_BUFFER: f64 = 2.0;

/// Headroom the forklift needs above an item to lift it into its slot.
pub const FORKLIFT_LIFT_MARGIN: f64 = 15.0;

/// Width of the forklift chassis.
pub const FORKLIFT_WIDTH: f64 = 110.0;

/// Vertical extent of the forklift mast.
pub const FORKLIFT_MAST_HEIGHT: f64 = 160.0;

/// Items whose bottom lies at or above this height clear the chassis.
pub const FORKLIFT_CHASSIS_HEIGHT: f64 = 140.0;

/// Lateral reach of the side-shifter relative to the chassis centre.
pub const SIDE_SHIFT: f64 = 60.0;

/// Clearance kept between the chassis and the container walls.
pub const WALL_BUFFER: f64 = 2.0;

/// Minimum supported fraction of a stacked item's base.
pub const SUPPORT_RATIO: f64 = 0.70;

/// Supported fraction below which the overhang scoring penalty applies.
pub const SCORE_SUPPORT_RATIO: f64 = 0.85;

/// Largest-single-supporter fraction below which the instability penalty
/// applies.
pub const LARGEST_SUPPORTER_RATIO: f64 = 0.90;

/// Lateral zone width for the terraced stacking penalty.
pub const Z_ZONE_SIZE: f64 = 150.0;

/// Bucket width of the spatial grid along the loading axis.
pub const GRID_SIZE: f64 = 50.0;

/// Score reduction for a touching neighbour of the same cargo spec.
pub const ADHESION_BONUS: f64 = 50.0;

/// Score reduction for a top surface flush with a lateral neighbour.
pub const FLUSH_BONUS: f64 = 200.0;

/// Tolerance when equating a candidate's base height with a supporter's
/// top surface.
pub const SUPPORT_TOLERANCE: f64 = 0.1;
