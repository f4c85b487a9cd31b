//! Cargo declarations and their unit expansion.

use crate::{Error, Result};
use nalgebra::Vector3;
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a cargo spec.
pub type CargoId = String;

/// A declared cargo item type with quantity.
///
/// Length and width are interchangeable under rotation about the vertical
/// axis; height is fixed (items are never tipped).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CargoSpec {
    /// Unique identifier.
    pub id: CargoId,

    /// Human-readable name.
    pub name: String,

    /// Length in centimetres (along the loading axis before rotation).
    pub length: f64,

    /// Width in centimetres (lateral before rotation).
    pub width: f64,

    /// Height in centimetres.
    pub height: f64,

    /// Weight of one unit in kilograms.
    pub weight: f64,

    /// Number of units to load.
    pub quantity: usize,

    /// Whether other items may be stacked on top of this one.
    pub unstackable: bool,

    /// Opaque visual tag, passed through for presentation layers.
    pub tag: Option<String>,
}

impl CargoSpec {
    /// Creates a new cargo spec with quantity 1.
    pub fn new(
        id: impl Into<CargoId>,
        name: impl Into<String>,
        length: f64,
        width: f64,
        height: f64,
        weight: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            length,
            width,
            height,
            weight,
            quantity: 1,
            unstackable: false,
            tag: None,
        }
    }

    /// Sets the quantity to load.
    pub fn with_quantity(mut self, quantity: usize) -> Self {
        self.quantity = quantity;
        self
    }

    /// Marks the item as unstackable (nothing may rest on top of it).
    pub fn with_unstackable(mut self, unstackable: bool) -> Self {
        self.unstackable = unstackable;
        self
    }

    /// Sets the visual tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Footprint area of one unit in cm².
    pub fn base_area(&self) -> f64 {
        self.length * self.width
    }

    /// Volume of one unit in cm³.
    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }

    /// Validates the declaration.
    pub fn validate(&self) -> Result<()> {
        for (label, value) in [
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidCargo(format!(
                    "{}: {} must be positive, got {}",
                    self.id, label, value
                )));
            }
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(Error::InvalidCargo(format!(
                "{}: weight must be non-negative, got {}",
                self.id, self.weight
            )));
        }
        if self.quantity == 0 {
            return Err(Error::InvalidCargo(format!(
                "{}: quantity must be at least 1",
                self.id
            )));
        }
        Ok(())
    }
}

/// A unit occurrence expanded from a [`CargoSpec`].
///
/// Units are immutable and consumed when placed. Dimensions are
/// denormalized onto the unit so the packer's hot path never chases the
/// spec list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CargoUnit {
    /// Id of the source spec.
    pub spec_id: CargoId,

    /// 0-based instance index within the spec.
    pub instance: usize,

    /// Axis extents in the identity orientation: x = length (loading
    /// axis), y = height (vertical), z = width (lateral).
    pub extent: Vector3<f64>,

    /// Weight in kilograms.
    pub weight: f64,

    /// Whether other items may rest on top.
    pub unstackable: bool,
}

impl CargoUnit {
    /// Extents with the length/width swap applied when `rotated`.
    pub fn oriented_extent(&self, rotated: bool) -> Vector3<f64> {
        if rotated {
            Vector3::new(self.extent.z, self.extent.y, self.extent.x)
        } else {
            self.extent
        }
    }

    /// Footprint area in cm² (orientation-independent).
    pub fn base_area(&self) -> f64 {
        self.extent.x * self.extent.z
    }

    /// Volume in cm³.
    pub fn volume(&self) -> f64 {
        self.extent.x * self.extent.y * self.extent.z
    }
}

/// Expands cargo specs into the flat unit multiset the planner packs.
///
/// Validates every spec and rejects duplicate ids.
pub fn expand_units(specs: &[CargoSpec]) -> Result<Vec<CargoUnit>> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut units = Vec::with_capacity(specs.iter().map(|s| s.quantity).sum());

    for spec in specs {
        spec.validate()?;
        if !seen.insert(spec.id.as_str()) {
            return Err(Error::InvalidCargo(format!(
                "duplicate cargo id: {}",
                spec.id
            )));
        }
        for instance in 0..spec.quantity {
            units.push(CargoUnit {
                spec_id: spec.id.clone(),
                instance,
                extent: Vector3::new(spec.length, spec.height, spec.width),
                weight: spec.weight,
                unstackable: spec.unstackable,
            });
        }
    }

    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_builder() {
        let spec = CargoSpec::new("c1", "Crate", 120.0, 100.0, 80.0, 50.0)
            .with_quantity(3)
            .with_unstackable(true)
            .with_tag("blue");

        assert_eq!(spec.quantity, 3);
        assert!(spec.unstackable);
        assert_eq!(spec.tag.as_deref(), Some("blue"));
        assert_eq!(spec.base_area(), 12000.0);
        assert_eq!(spec.volume(), 960000.0);
    }

    #[test]
    fn test_validate_rejects_bad_declarations() {
        let spec = CargoSpec::new("c1", "Crate", -1.0, 100.0, 80.0, 50.0);
        assert!(spec.validate().is_err());

        let spec = CargoSpec::new("c1", "Crate", 120.0, 100.0, 80.0, -5.0);
        assert!(spec.validate().is_err());

        let spec = CargoSpec::new("c1", "Crate", 120.0, 100.0, 80.0, 50.0).with_quantity(0);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_expand_units() {
        let specs = vec![
            CargoSpec::new("a", "A", 120.0, 100.0, 80.0, 50.0).with_quantity(2),
            CargoSpec::new("b", "B", 60.0, 40.0, 30.0, 10.0),
        ];

        let units = expand_units(&specs).unwrap();
        assert_eq!(units.len(), 3);
        assert_eq!(units[0].spec_id, "a");
        assert_eq!(units[0].instance, 0);
        assert_eq!(units[1].instance, 1);
        assert_eq!(units[2].spec_id, "b");
        assert_eq!(units[0].extent, Vector3::new(120.0, 80.0, 100.0));
    }

    #[test]
    fn test_expand_rejects_duplicate_ids() {
        let specs = vec![
            CargoSpec::new("a", "A", 10.0, 10.0, 10.0, 1.0),
            CargoSpec::new("a", "A again", 20.0, 20.0, 20.0, 2.0),
        ];
        assert!(expand_units(&specs).is_err());
    }

    #[test]
    fn test_oriented_extent_swaps_length_and_width() {
        let unit = CargoUnit {
            spec_id: "a".into(),
            instance: 0,
            extent: Vector3::new(120.0, 80.0, 100.0),
            weight: 50.0,
            unstackable: false,
        };

        assert_eq!(
            unit.oriented_extent(false),
            Vector3::new(120.0, 80.0, 100.0)
        );
        assert_eq!(unit.oriented_extent(true), Vector3::new(100.0, 80.0, 120.0));
    }
}
