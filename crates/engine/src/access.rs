//! Forklift access feasibility.
//!
//! The truck is modelled as a rectangular chassis carrying a side-shifter
//! that can displace the mast laterally relative to the chassis centre.
//! The chassis reaches a candidate placement from the door end, driving
//! along decreasing x, and stops at the placement's loading face. Access
//! exists when at least one chassis-centre lateral position satisfies the
//! wall clearances, the side-shift reach, and collision freedom against
//! everything already committed between the loading face and the door.

use crate::grid::SpatialGrid;
use nalgebra::Vector3;
use stowage_core::constants::{
    FORKLIFT_CHASSIS_HEIGHT, FORKLIFT_MAST_HEIGHT, FORKLIFT_WIDTH, SIDE_SHIFT, WALL_BUFFER,
};
use stowage_core::{ContainerSpec, Placement};

/// Removes `[lo, hi]` from a disjoint interval list.
fn subtract_interval(intervals: &mut Vec<(f64, f64)>, lo: f64, hi: f64) {
    let mut remaining = Vec::with_capacity(intervals.len() + 1);
    for &(a, b) in intervals.iter() {
        if hi <= a || lo >= b {
            remaining.push((a, b));
            continue;
        }
        if a < lo {
            remaining.push((a, lo));
        }
        if hi < b {
            remaining.push((hi, b));
        }
    }
    *intervals = remaining;
}

/// Whether a forklift can deliver an item to `position` given the items
/// already placed.
pub fn has_forklift_access(
    position: Vector3<f64>,
    extent: Vector3<f64>,
    container: &ContainerSpec,
    placements: &[Placement],
    grid: &SpatialGrid,
) -> bool {
    let half_width = FORKLIFT_WIDTH / 2.0;

    // Chassis centre range allowed by the walls, narrowed by how far the
    // side-shifter can reach the placement's lateral centre.
    let target = position.z + extent.z / 2.0;
    let lo = (half_width + WALL_BUFFER).max(target - SIDE_SHIFT);
    let hi = (container.width - half_width - WALL_BUFFER).min(target + SIDE_SHIFT);
    if lo > hi {
        return false;
    }

    let mut free = vec![(lo, hi)];

    // Everything between the loading face and the door that the chassis
    // or mast could strike forbids a band of centre positions.
    let loading_face = position.x + extent.x;
    for id in grid.query(loading_face, container.length) {
        let p = &placements[id];
        if p.position.x + p.extent.x <= loading_face {
            continue;
        }
        if p.position.y >= FORKLIFT_CHASSIS_HEIGHT {
            continue;
        }
        if p.position.y >= FORKLIFT_MAST_HEIGHT || p.top() <= 0.0 {
            continue;
        }
        subtract_interval(
            &mut free,
            p.position.z - half_width,
            p.position.z + p.extent.z + half_width,
        );
        if free.is_empty() {
            return false;
        }
    }

    true
}
