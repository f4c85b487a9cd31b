//! Pack results and shipment aggregation.

use crate::cargo::CargoUnit;
use crate::container::ContainerType;
use crate::placement::Placement;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cubic centimetres per cubic metre.
const CM3_PER_M3: f64 = 1_000_000.0;

/// The outcome of packing one container.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackResult {
    /// Container type used.
    pub container: ContainerType,

    /// Placements in loading order.
    pub placements: Vec<Placement>,

    /// Units that could not be placed. Only the last result of a
    /// shipment carries the aggregate residual.
    pub unplaced: Vec<CargoUnit>,

    /// Volume of placed cargo in m³.
    pub used_volume_m3: f64,

    /// Placed volume over interior volume (0.0 - 1.0).
    pub volume_utilization: f64,

    /// Total placed weight in kilograms.
    pub total_weight: f64,

    /// Placed weight over maximum payload (0.0 - 1.0).
    pub weight_utilization: f64,
}

impl PackResult {
    /// Creates an empty result for the given container type.
    pub fn new(container: ContainerType) -> Self {
        Self {
            container,
            placements: Vec::new(),
            unplaced: Vec::new(),
            used_volume_m3: 0.0,
            volume_utilization: 0.0,
            total_weight: 0.0,
            weight_utilization: 0.0,
        }
    }

    /// Recomputes the utilization figures from the placement list.
    pub fn recompute_stats(&mut self) {
        let spec = self.container.spec();
        let used_cm3: f64 = self.placements.iter().map(Placement::volume).sum();
        self.used_volume_m3 = used_cm3 / CM3_PER_M3;
        self.volume_utilization = used_cm3 / spec.volume();
        self.total_weight = self.placements.iter().map(|p| p.weight).sum();
        self.weight_utilization = self.total_weight / spec.max_payload;
    }

    /// Number of placed units.
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// Returns true if nothing was left unplaced.
    pub fn all_placed(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Utilization as a percentage string.
    pub fn utilization_percent(&self) -> String {
        format!("{:.1}%", self.volume_utilization * 100.0)
    }
}

/// An ordered sequence of pack results covering one cargo manifest.
///
/// The multiset union of all placements and the final residual equals the
/// input cargo.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shipment {
    /// Pack results in loading order.
    pub results: Vec<PackResult>,

    /// Whether planning was cancelled before completion.
    pub cancelled: bool,
}

impl Shipment {
    /// Creates an empty shipment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of containers used.
    pub fn containers_used(&self) -> usize {
        self.results.len()
    }

    /// Total number of placed units across all containers.
    pub fn placed_count(&self) -> usize {
        self.results.iter().map(PackResult::placed_count).sum()
    }

    /// The units that could not be placed anywhere.
    pub fn residual(&self) -> &[CargoUnit] {
        self.results
            .last()
            .map(|r| r.unplaced.as_slice())
            .unwrap_or(&[])
    }

    /// Returns true if every input unit was placed.
    pub fn all_placed(&self) -> bool {
        self.residual().is_empty()
    }

    /// Flat summary figures for presentation layers.
    pub fn summary(&self) -> ShipmentSummary {
        let interior_cm3: f64 = self
            .results
            .iter()
            .map(|r| r.container.spec().volume())
            .sum();
        let used_cm3: f64 = self
            .results
            .iter()
            .map(|r| r.used_volume_m3 * CM3_PER_M3)
            .sum();

        ShipmentSummary {
            containers_used: self.containers_used(),
            total_placed: self.placed_count(),
            total_unplaced: self.residual().len(),
            total_weight: self.results.iter().map(|r| r.total_weight).sum(),
            volume_utilization: if interior_cm3 > 0.0 {
                used_cm3 / interior_cm3
            } else {
                0.0
            },
            cancelled: self.cancelled,
        }
    }
}

/// Summary statistics for a shipment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShipmentSummary {
    /// Containers used.
    pub containers_used: usize,
    /// Units placed.
    pub total_placed: usize,
    /// Units left unplaced.
    pub total_unplaced: usize,
    /// Aggregate placed weight in kilograms.
    pub total_weight: f64,
    /// Aggregate volume utilization across all containers (0.0 - 1.0).
    pub volume_utilization: f64,
    /// Whether planning was cancelled.
    pub cancelled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn placement(side: f64, weight: f64) -> Placement {
        Placement {
            spec_id: "a".into(),
            instance: 0,
            position: Vector3::zeros(),
            extent: Vector3::new(side, side, side),
            rotated: false,
            sequence: 1,
            container_index: 0,
            weight,
            unstackable: false,
        }
    }

    #[test]
    fn test_recompute_stats() {
        let mut result = PackResult::new(ContainerType::Gp20);
        result.placements.push(placement(100.0, 500.0));
        result.recompute_stats();

        assert_relative_eq!(result.used_volume_m3, 1.0);
        assert_relative_eq!(
            result.volume_utilization,
            1_000_000.0 / ContainerType::Gp20.spec().volume()
        );
        assert_relative_eq!(result.total_weight, 500.0);
        assert_relative_eq!(result.weight_utilization, 500.0 / 28000.0);
    }

    #[test]
    fn test_empty_shipment() {
        let shipment = Shipment::new();
        assert_eq!(shipment.containers_used(), 0);
        assert!(shipment.all_placed());
        assert!(shipment.residual().is_empty());
        assert_eq!(shipment.summary().volume_utilization, 0.0);
    }

    #[test]
    fn test_residual_lives_on_last_result() {
        let mut shipment = Shipment::new();
        shipment.results.push(PackResult::new(ContainerType::Gp20));

        let mut last = PackResult::new(ContainerType::Gp40);
        last.unplaced.push(CargoUnit {
            spec_id: "a".into(),
            instance: 0,
            extent: Vector3::new(10.0, 10.0, 10.0),
            weight: 1.0,
            unstackable: false,
        });
        shipment.results.push(last);

        assert_eq!(shipment.residual().len(), 1);
        assert!(!shipment.all_placed());
        assert_eq!(shipment.summary().total_unplaced, 1);
    }
}
