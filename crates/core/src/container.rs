//! Container catalogue and interior geometry.

use crate::constants::{FORKLIFT_LIFT_MARGIN, OPERATION_BUFFER};
use crate::{Error, Result};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The standard intermodal container types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ContainerType {
    /// 20-foot general purpose.
    Gp20,
    /// 40-foot general purpose.
    Gp40,
    /// 40-foot high cube.
    Hq40,
}

impl ContainerType {
    /// All catalogue entries, smallest first.
    pub const ALL: [ContainerType; 3] = [Self::Gp20, Self::Gp40, Self::Hq40];

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gp20 => "20GP",
            Self::Gp40 => "40GP",
            Self::Hq40 => "40HQ",
        }
    }

    /// Practical safe-loading interior for this type.
    ///
    /// The figures are intentionally conservative versus nominal ISO
    /// dimensions, keeping a door-closure buffer.
    pub const fn spec(&self) -> ContainerSpec {
        match self {
            Self::Gp20 => ContainerSpec {
                length: 580.0,
                width: 235.0,
                height: 239.0,
                door_width: 234.0,
                door_height: 228.0,
                max_payload: 28000.0,
            },
            Self::Gp40 => ContainerSpec {
                length: 1185.0,
                width: 235.0,
                height: 239.0,
                door_width: 234.0,
                door_height: 228.0,
                max_payload: 28000.0,
            },
            Self::Hq40 => ContainerSpec {
                length: 1185.0,
                width: 235.0,
                height: 269.0,
                door_width: 234.0,
                door_height: 258.0,
                max_payload: 28500.0,
            },
        }
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Interior dimensions and limits of one container.
///
/// Distances in centimetres, payload in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContainerSpec {
    /// Interior length (rear wall to door).
    pub length: f64,
    /// Interior width.
    pub width: f64,
    /// Interior height.
    pub height: f64,
    /// Door opening width.
    pub door_width: f64,
    /// Door opening height.
    pub door_height: f64,
    /// Maximum payload weight.
    pub max_payload: f64,
}

impl ContainerSpec {
    /// Interior volume in cm³.
    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }

    /// Usable extent along the loading axis.
    pub fn usable_length(&self) -> f64 {
        self.length - OPERATION_BUFFER
    }

    /// Usable lateral extent.
    pub fn usable_width(&self) -> f64 {
        self.width - OPERATION_BUFFER
    }

    /// Usable vertical extent, leaving room for the forklift to lift the
    /// topmost item into place.
    pub fn usable_height(&self) -> f64 {
        self.height - OPERATION_BUFFER - FORKLIFT_LIFT_MARGIN
    }

    /// Whether an item of the given dimensions passes the door opening in
    /// at least one planar orientation.
    pub fn door_admits(&self, length: f64, width: f64, height: f64) -> bool {
        height <= self.door_height && (width <= self.door_width || length <= self.door_width)
    }

    /// Validates the specification.
    pub fn validate(&self) -> Result<()> {
        if self.length <= 0.0 || self.width <= 0.0 || self.height <= 0.0 {
            return Err(Error::InvalidContainer(
                "interior dimensions must be positive".into(),
            ));
        }
        if self.door_width <= 0.0 || self.door_height <= 0.0 {
            return Err(Error::InvalidContainer(
                "door opening must be positive".into(),
            ));
        }
        if self.max_payload <= 0.0 {
            return Err(Error::InvalidContainer(
                "maximum payload must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_catalogue() {
        let gp20 = ContainerType::Gp20.spec();
        assert_eq!(gp20.length, 580.0);
        assert_eq!(gp20.max_payload, 28000.0);

        let hq40 = ContainerType::Hq40.spec();
        assert_eq!(hq40.height, 269.0);
        assert_eq!(hq40.door_height, 258.0);
        assert_eq!(hq40.max_payload, 28500.0);

        assert_eq!(ContainerType::Gp40.name(), "40GP");
        assert_eq!(ContainerType::Hq40.to_string(), "40HQ");
    }

    #[test]
    fn test_usable_interior() {
        let spec = ContainerType::Gp40.spec();
        assert_relative_eq!(spec.usable_length(), 1183.0);
        assert_relative_eq!(spec.usable_width(), 233.0);
        assert_relative_eq!(spec.usable_height(), 222.0);
    }

    #[test]
    fn test_door_admits_either_planar_orientation() {
        let spec = ContainerType::Gp20.spec();

        // Fits as declared.
        assert!(spec.door_admits(100.0, 100.0, 100.0));
        // Width too wide but length passes after rotation.
        assert!(spec.door_admits(200.0, 300.0, 100.0));
        // Too tall in any orientation.
        assert!(!spec.door_admits(100.0, 100.0, 230.0));
        // Both planar dimensions too wide.
        assert!(!spec.door_admits(300.0, 300.0, 100.0));
    }

    #[test]
    fn test_validate() {
        assert!(ContainerType::Gp20.spec().validate().is_ok());

        let bad = ContainerSpec {
            length: 0.0,
            ..ContainerType::Gp20.spec()
        };
        assert!(bad.validate().is_err());
    }
}
