//! Single-container packing loop.
//!
//! The packer repeatedly evaluates one representative unit per cargo spec
//! against every live anchor in both orientations, commits the single
//! best-scoring feasible move, and updates the grid and anchor set.
//! Commits are monotonic: once placed, an item never moves. The loop ends
//! when a full pass yields no admissible move, or when cancellation is
//! observed at a yield point.

use crate::candidates::{slide_floor_z, AnchorSet};
use crate::feasibility::is_valid;
use crate::grid::SpatialGrid;
use crate::scoring::{score, ScoreContext};
use nalgebra::Vector3;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use stowage_core::constants::SUPPORT_TOLERANCE;
use stowage_core::{CargoUnit, ContainerType, PackResult, Placement};

/// The outcome of packing one container.
#[derive(Debug)]
pub struct ContainerOutcome {
    /// The committed placements and utilization figures. The result's
    /// `unplaced` list is left empty; residual routing is the planner's
    /// concern.
    pub result: PackResult,
    /// Units left over for the next container, in their original order.
    pub residual: Vec<CargoUnit>,
    /// Whether packing stopped at a yield point due to cancellation.
    pub cancelled: bool,
}

/// Packs one container from a sorted unit pool.
#[derive(Debug, Clone)]
pub struct ContainerPacker {
    container: ContainerType,
    yield_interval: usize,
}

impl ContainerPacker {
    /// Creates a packer for the given container type.
    pub fn new(container: ContainerType) -> Self {
        Self {
            container,
            yield_interval: 5,
        }
    }

    /// Sets how many commits happen between cancellation checks.
    pub fn with_yield_interval(mut self, interval: usize) -> Self {
        self.yield_interval = interval.max(1);
        self
    }

    /// Runs the packing loop.
    ///
    /// `container_index` stamps every placement; `cancelled` is read at
    /// each yield point.
    pub fn pack(
        &self,
        units: &[CargoUnit],
        container_index: usize,
        cancelled: &AtomicBool,
    ) -> ContainerOutcome {
        let spec = self.container.spec();
        let mut pool: Vec<CargoUnit> = units.to_vec();
        let mut placements: Vec<Placement> = Vec::new();
        let mut grid = SpatialGrid::new(spec.length);
        let mut anchors = AnchorSet::new();
        let mut total_weight = 0.0;
        let mut was_cancelled = false;

        loop {
            // Cooperative yield point.
            if !placements.is_empty()
                && placements.len() % self.yield_interval == 0
                && cancelled.load(Ordering::Relaxed)
            {
                was_cancelled = true;
                break;
            }

            let unstackable_heights = remaining_cap_heights(&pool);
            let ctx = ScoreContext {
                container: &spec,
                placements: &placements,
                grid: &grid,
                unstackable_heights: &unstackable_heights,
            };

            // One representative per spec, first occurrence in pool order;
            // all copies of a spec are interchangeable.
            let mut best: Option<(f64, usize, Vector3<f64>, bool)> = None;
            let mut seen_specs: HashSet<String> = HashSet::new();
            for (unit_idx, unit) in pool.iter().enumerate() {
                if !seen_specs.insert(unit.spec_id.clone()) {
                    continue;
                }
                if !spec.door_admits(unit.extent.x, unit.extent.z, unit.extent.y) {
                    continue;
                }
                if total_weight + unit.weight > spec.max_payload {
                    continue;
                }

                for anchor in anchors.iter() {
                    for rotated in [false, true] {
                        let extent = unit.oriented_extent(rotated);
                        if !is_valid(
                            *anchor,
                            extent,
                            unit.unstackable,
                            &spec,
                            &placements,
                            &grid,
                        ) {
                            continue;
                        }

                        let position = if anchor.y < SUPPORT_TOLERANCE {
                            slide_floor_z(
                                *anchor,
                                extent,
                                unit.unstackable,
                                &spec,
                                &placements,
                                &grid,
                            )
                        } else {
                            *anchor
                        };

                        let candidate_score = score(unit, position, extent, &ctx);
                        if best
                            .as_ref()
                            .map_or(true, |(s, ..)| candidate_score < *s)
                        {
                            best = Some((candidate_score, unit_idx, position, rotated));
                        }
                    }
                }
            }

            let Some((_, unit_idx, position, rotated)) = best else {
                break;
            };

            let unit = pool.remove(unit_idx);
            let placement = Placement::new(
                &unit,
                position,
                rotated,
                placements.len() + 1,
                container_index,
            );
            grid.insert(
                placements.len(),
                placement.position.x,
                placement.position.x + placement.extent.x,
            );
            total_weight += placement.weight;
            placements.push(placement.clone());
            anchors.commit(&placement, &spec, &placements);
        }

        let mut result = PackResult::new(self.container);
        result.placements = placements;
        result.recompute_stats();

        ContainerOutcome {
            result,
            residual: pool,
            cancelled: was_cancelled,
        }
    }
}

/// Distinct heights of the unstackable units still in the pool.
fn remaining_cap_heights(pool: &[CargoUnit]) -> Vec<f64> {
    let mut heights: Vec<f64> = pool
        .iter()
        .filter(|u| u.unstackable)
        .map(|u| u.extent.y)
        .collect();
    heights.sort_by(f64::total_cmp);
    heights.dedup();
    heights
}

#[cfg(test)]
mod tests {
    use super::*;
    use stowage_core::CargoSpec;

    fn units_of(spec: &CargoSpec) -> Vec<CargoUnit> {
        stowage_core::expand_units(std::slice::from_ref(spec)).unwrap()
    }

    #[test]
    fn test_single_unit_lands_at_origin() {
        let spec = CargoSpec::new("c1", "Crate", 120.0, 100.0, 100.0, 50.0);
        let cancelled = AtomicBool::new(false);

        let outcome =
            ContainerPacker::new(ContainerType::Gp20).pack(&units_of(&spec), 0, &cancelled);

        assert_eq!(outcome.result.placed_count(), 1);
        assert!(outcome.residual.is_empty());
        let p = &outcome.result.placements[0];
        assert_eq!(p.position, Vector3::zeros());
        assert!(!p.rotated);
        assert_eq!(p.sequence, 1);
    }

    #[test]
    fn test_sequences_are_monotonic() {
        let spec = CargoSpec::new("c1", "Crate", 100.0, 100.0, 100.0, 50.0).with_quantity(6);
        let cancelled = AtomicBool::new(false);

        let outcome =
            ContainerPacker::new(ContainerType::Gp40).pack(&units_of(&spec), 2, &cancelled);

        assert_eq!(outcome.result.placed_count(), 6);
        for (i, p) in outcome.result.placements.iter().enumerate() {
            assert_eq!(p.sequence, i + 1);
            assert_eq!(p.container_index, 2);
        }
    }

    #[test]
    fn test_door_unfit_units_stay_in_residual() {
        // Taller than the 228 door in any planar orientation.
        let spec = CargoSpec::new("tall", "Tall", 100.0, 100.0, 230.0, 50.0).with_quantity(2);
        let cancelled = AtomicBool::new(false);

        let outcome =
            ContainerPacker::new(ContainerType::Gp20).pack(&units_of(&spec), 0, &cancelled);

        assert_eq!(outcome.result.placed_count(), 0);
        assert_eq!(outcome.residual.len(), 2);
        assert!(!outcome.cancelled);
    }

    #[test]
    fn test_weight_cap_skips_to_residual() {
        // Three units would exceed the payload; two fit.
        let spec =
            CargoSpec::new("heavy", "Heavy", 100.0, 100.0, 100.0, 12_000.0).with_quantity(3);
        let cancelled = AtomicBool::new(false);

        let outcome =
            ContainerPacker::new(ContainerType::Gp20).pack(&units_of(&spec), 0, &cancelled);

        assert_eq!(outcome.result.placed_count(), 2);
        assert_eq!(outcome.residual.len(), 1);
        assert!(outcome.result.total_weight <= 28_000.0);
    }

    #[test]
    fn test_cancellation_stops_at_yield_point() {
        let spec = CargoSpec::new("c1", "Crate", 100.0, 100.0, 100.0, 50.0).with_quantity(12);
        let cancelled = AtomicBool::new(true);

        let outcome = ContainerPacker::new(ContainerType::Gp40)
            .with_yield_interval(5)
            .pack(&units_of(&spec), 0, &cancelled);

        assert!(outcome.cancelled);
        assert_eq!(outcome.result.placed_count(), 5);
        assert_eq!(outcome.residual.len(), 7);
    }

    #[test]
    fn test_rotation_used_when_identity_cannot_fit() {
        // A 240 cm width exceeds the 233 cm usable lateral span; only the
        // swapped orientation, long side down the length axis, fits.
        let spec = CargoSpec::new("long", "Long", 100.0, 240.0, 100.0, 50.0);
        let cancelled = AtomicBool::new(false);

        let outcome =
            ContainerPacker::new(ContainerType::Gp40).pack(&units_of(&spec), 0, &cancelled);

        assert_eq!(outcome.result.placed_count(), 1);
        assert!(outcome.result.placements[0].rotated);
    }
}
