//! Placement representation for loaded cargo units.

use crate::cargo::{CargoId, CargoUnit};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The committed location of one cargo unit inside a container.
///
/// Placements are immutable once committed; the loading sequence number is
/// 1-based and strictly increasing in commit order within a container.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Id of the source cargo spec.
    pub spec_id: CargoId,

    /// Instance index within the spec.
    pub instance: usize,

    /// Minimum corner (x toward the door, y vertical, z lateral).
    pub position: Vector3<f64>,

    /// Oriented axis extents: x = oriented length, y = height,
    /// z = oriented width.
    pub extent: Vector3<f64>,

    /// Whether the length/width swap was applied.
    pub rotated: bool,

    /// 1-based loading sequence number within the container.
    pub sequence: usize,

    /// Index of the container within the shipment.
    pub container_index: usize,

    /// Weight in kilograms.
    pub weight: f64,

    /// Whether other items may rest on top.
    pub unstackable: bool,
}

impl Placement {
    /// Creates a placement for a unit at the given position.
    pub fn new(
        unit: &CargoUnit,
        position: Vector3<f64>,
        rotated: bool,
        sequence: usize,
        container_index: usize,
    ) -> Self {
        Self {
            spec_id: unit.spec_id.clone(),
            instance: unit.instance,
            position,
            extent: unit.oriented_extent(rotated),
            rotated,
            sequence,
            container_index,
            weight: unit.weight,
            unstackable: unit.unstackable,
        }
    }

    /// Maximum corner.
    pub fn max_corner(&self) -> Vector3<f64> {
        self.position + self.extent
    }

    /// Height of the top surface.
    pub fn top(&self) -> f64 {
        self.position.y + self.extent.y
    }

    /// Footprint area in cm².
    pub fn base_area(&self) -> f64 {
        self.extent.x * self.extent.z
    }

    /// Volume in cm³.
    pub fn volume(&self) -> f64 {
        self.extent.x * self.extent.y * self.extent.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> CargoUnit {
        CargoUnit {
            spec_id: "a".into(),
            instance: 0,
            extent: Vector3::new(120.0, 80.0, 100.0),
            weight: 50.0,
            unstackable: false,
        }
    }

    #[test]
    fn test_placement_identity_orientation() {
        let p = Placement::new(&unit(), Vector3::new(0.0, 0.0, 10.0), false, 1, 0);
        assert_eq!(p.extent, Vector3::new(120.0, 80.0, 100.0));
        assert_eq!(p.max_corner(), Vector3::new(120.0, 80.0, 110.0));
        assert_eq!(p.top(), 80.0);
        assert_eq!(p.volume(), 960000.0);
    }

    #[test]
    fn test_placement_rotated() {
        let p = Placement::new(&unit(), Vector3::new(0.0, 0.0, 0.0), true, 2, 1);
        assert!(p.rotated);
        assert_eq!(p.extent, Vector3::new(100.0, 80.0, 120.0));
        assert_eq!(p.sequence, 2);
        assert_eq!(p.container_index, 1);
    }
}
